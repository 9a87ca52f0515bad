//! names-core
//!
//! Core library for naming addresses discovered while analyzing native binaries.
//!
//! Candidate names are gathered from user configuration, recovered debug
//! information, and the tables of the executable image itself. Each candidate
//! carries a provenance kind; the registry ranks candidates per address and
//! exposes a single preferred name plus the full candidate set.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, analysis passes, etc.).

pub mod model;
pub mod naming;
pub mod services;
pub mod sources;

pub use model::{Address, Name, NameKind, Names, NAME_KIND_PRECEDENCE};
pub use services::provider::{NameRegistryProvider, RegistrySources, SessionId};
pub use services::registry::NameRegistry;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
