//! Core data model: addresses, candidate names, and per-address name sets.
//!
//! - `Address`: a binary address with a distinguished undefined value.
//! - `NameKind`: where a candidate name came from, with an explicit precedence.
//! - `Name`: one normalized candidate name plus its kind.
//! - `Names`: the ranked set of candidates attached to one address.

mod address;
mod name;
mod names;

pub use address::{Address, AddressParseError};
pub use name::{Name, NameKind, NAME_KIND_PRECEDENCE};
pub use names::Names;
