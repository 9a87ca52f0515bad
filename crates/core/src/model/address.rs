use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A location in a binary file or its memory image.
///
/// `Address::UNDEFINED` stands for "unknown"; it is also the `Default`, so
/// declarations that omit an address deserialize to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressRepr", into = "u64")]
pub struct Address(u64);

/// Error returned when a textual address cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid address '{0}': expected decimal digits or a 0x-prefixed hex value")]
pub struct AddressParseError(pub String);

impl Address {
    /// Sentinel for an unknown address.
    pub const UNDEFINED: Address = Address(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub const fn is_undefined(self) -> bool {
        self.0 == u64::MAX
    }

    pub const fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Lower-case hex digits without a `0x` prefix, as used in generated names.
    pub fn to_hex_string(self) -> String {
        format!("{:x}", self.0)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Address> for u64 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            f.write_str("<undefined>")
        } else {
            write!(f, "0x{:x}", self.0)
        }
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed.map(Address).map_err(|_| AddressParseError(s.to_string()))
    }
}

/// On-disk representation: either a plain integer or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<AddressRepr> for Address {
    type Error = AddressParseError;

    fn try_from(repr: AddressRepr) -> Result<Self, Self::Error> {
        match repr {
            AddressRepr::Number(value) => Ok(Address(value)),
            AddressRepr::Text(text) => text.parse(),
        }
    }
}

