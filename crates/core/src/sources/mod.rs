//! Interfaces of the collaborators a `NameRegistry` is populated from.
//!
//! Each source has a trait (the seam the registry is written against) and a
//! plain, serde-friendly data type implementing it:
//! - `ConfigSource` / `NamesConfig`: user-declared names and parameters.
//! - `DebugSource` / `DebugInfo`: names recovered from debug information.
//! - `ImageSource` / `ImageInfo`: tables parsed from the executable image.
//! - `Demangler`: symbol demangling capability handed to the registry.

use std::path::Path;

use crate::model::Address;

pub mod config;
pub mod debug;
pub mod demangle;
pub mod image;

pub use config::{load_names_config, ConfigError, Declaration, NamesConfig, NamesParameters};
pub use debug::{load_debug_info, DebugFunction, DebugGlobal, DebugInfo, Storage};
pub use demangle::{Demangler, NullDemangler, RustDemangler};
pub use image::{
    ImageExport, ImageImport, ImageInfo, ImageSegment, ImageSymbol, ImportTable, SymbolTable,
    SymbolUsage,
};

/// User-supplied configuration.
pub trait ConfigSource {
    /// Configured entry point; `Address::UNDEFINED` if none.
    fn entry_point(&self) -> Address;
    fn functions(&self) -> &[Declaration];
    fn globals(&self) -> &[Declaration];
    fn segments(&self) -> &[Declaration];
    /// Directory holding `<library>.ord` files, if configured.
    fn ordinals_directory(&self) -> Option<&Path>;
}

/// Names recovered from debug information.
pub trait DebugSource {
    fn functions(&self) -> &[DebugFunction];
    fn globals(&self) -> &[DebugGlobal];
}

/// Structures parsed from the executable image.
pub trait ImageSource {
    fn import_table(&self) -> Option<&ImportTable>;
    fn export_table(&self) -> Option<&[ImageExport]>;
    fn symbol_tables(&self) -> &[SymbolTable];
    /// Entry point, when the format exposes one directly.
    fn entry_point(&self) -> Option<Address>;
    fn segments(&self) -> &[ImageSegment];
}
