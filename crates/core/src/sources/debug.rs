use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::Address;
use crate::sources::config::{load_structured, ConfigError};
use crate::sources::DebugSource;

/// Where a debug-described global lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    Memory {
        address: Address,
    },
    Register {
        name: String,
    },
    Stack {
        offset: i64,
    },
    #[default]
    Undefined,
}

impl Storage {
    /// The address, if this storage is in memory.
    pub fn memory_address(&self) -> Option<Address> {
        match self {
            Storage::Memory { address } => Some(*address),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFunction {
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugGlobal {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub storage: Storage,
}

/// Debug information already extracted from the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default)]
    pub functions: Vec<DebugFunction>,
    #[serde(default)]
    pub globals: Vec<DebugGlobal>,
}

impl DebugInfo {
    pub fn add_function(&mut self, address: impl Into<Address>, name: impl Into<String>) {
        self.functions.push(DebugFunction { address: address.into(), name: name.into() });
    }

    pub fn add_global(&mut self, name: impl Into<String>, storage: Storage) {
        self.globals.push(DebugGlobal { name: name.into(), storage });
    }
}

impl DebugSource for DebugInfo {
    fn functions(&self) -> &[DebugFunction] {
        &self.functions
    }

    fn globals(&self) -> &[DebugGlobal] {
        &self.globals
    }
}

/// Load `DebugInfo` from a JSON or YAML file.
pub fn load_debug_info(path: impl AsRef<Path>) -> Result<DebugInfo, ConfigError> {
    load_structured(path.as_ref())
}
