use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Address;
use crate::sources::ConfigSource;

/// Error type for loading configuration and debug-info files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Only `.json`, `.yaml` and `.yml` files are understood.
    #[error("Unsupported file extension for {0}; expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),
}

/// A named object declared in the configuration.
///
/// Both fields may be missing in the file; such entries are skipped when the
/// registry is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Address,
}

impl Declaration {
    pub fn new(name: impl Into<String>, address: impl Into<Address>) -> Self {
        Self { name: name.into(), address: address.into() }
    }
}

/// Tunable parameters that are not names themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesParameters {
    /// Directory containing `<library>.ord` ordinal files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinals_directory: Option<PathBuf>,
}

/// Serializable configuration describing what the user already knows about a binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesConfig {
    #[serde(default)]
    pub entry_point: Address,
    #[serde(default)]
    pub functions: Vec<Declaration>,
    #[serde(default)]
    pub globals: Vec<Declaration>,
    #[serde(default)]
    pub segments: Vec<Declaration>,
    #[serde(default)]
    pub parameters: NamesParameters,
}

impl NamesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ordinals_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parameters.ordinals_directory = Some(dir.into());
        self
    }
}

impl ConfigSource for NamesConfig {
    fn entry_point(&self) -> Address {
        self.entry_point
    }

    fn functions(&self) -> &[Declaration] {
        &self.functions
    }

    fn globals(&self) -> &[Declaration] {
        &self.globals
    }

    fn segments(&self) -> &[Declaration] {
        &self.segments
    }

    fn ordinals_directory(&self) -> Option<&Path> {
        self.parameters.ordinals_directory.as_deref()
    }
}

/// Load a `NamesConfig` from a JSON or YAML file, chosen by extension.
pub fn load_names_config(path: impl AsRef<Path>) -> Result<NamesConfig, ConfigError> {
    load_structured(path.as_ref())
}

pub(crate) fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source }),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source }),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
