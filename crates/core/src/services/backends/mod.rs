//! Image loaders that turn executable files into `ImageInfo`.
#[cfg(feature = "goblin-image")]
pub mod goblin;

#[cfg(feature = "goblin-image")]
pub use self::goblin::{load_image, load_image_file, pe_import, ImageError};
