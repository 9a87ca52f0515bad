pub mod dump;
pub mod generate;
pub mod ordinals;

pub use dump::*;
pub use generate::*;
pub use ordinals::*;
