//! Lazy lookup of import names by ordinal.
//!
//! Each library may have a `<ordinals-dir>/<library>.ord` text file with one
//! `<ordinal> <name>` record per line. Files are read on first use and cached
//! for the lifetime of the cache, including failed loads.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Ordinal -> function name for one library.
pub type OrdinalMap = HashMap<u64, String>;

/// File suffix of ordinal mapping files.
pub const ORDINAL_FILE_EXTENSION: &str = "ord";

/// Library file suffixes stripped during normalization.
const LIBRARY_SUFFIXES: &[&str] = &[".dll", ".drv", ".ocx", ".sys"];

/// Lower-case `library` and strip one trailing library-file suffix.
///
/// `"KERNEL32.DLL"` and `"kernel32"` both normalize to `"kernel32"`.
pub fn normalize_library_name(library: &str) -> String {
    let lower = library.trim().to_lowercase();
    for suffix in LIBRARY_SUFFIXES {
        if let Some(stem) = lower.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    lower
}

/// Parse ordinal file contents.
///
/// Lines whose first token is not a non-negative integer are skipped. A line
/// with an ordinal but no name records an empty name. A repeated ordinal keeps
/// its last entry.
pub fn parse_ordinal_map(contents: &str) -> OrdinalMap {
    let mut map = OrdinalMap::new();
    for line in contents.lines() {
        let mut tokens = line.split_whitespace();
        let Some(Ok(ordinal)) = tokens.next().map(str::parse::<u64>) else {
            continue;
        };
        map.insert(ordinal, tokens.next().unwrap_or_default().to_string());
    }
    map
}

/// Read and parse one ordinal file.
pub fn load_ordinal_file(path: &Path) -> io::Result<OrdinalMap> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_ordinal_map(&contents))
}

/// Per-library ordinal maps, keyed by normalized library name.
#[derive(Debug, Clone, Default)]
pub struct OrdinalCache {
    directory: Option<PathBuf>,
    /// `None` marks a library whose file could not be loaded.
    libraries: HashMap<String, Option<OrdinalMap>>,
}

impl OrdinalCache {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory, libraries: HashMap::new() }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Path of the ordinal file for an already normalized library name.
    pub fn file_path(&self, normalized: &str) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("{normalized}.{ORDINAL_FILE_EXTENSION}")))
    }

    /// Function name recorded for `ordinal` in `library`, loading the library's
    /// file on first request. Empty names count as unresolved.
    pub fn resolve(&mut self, library: &str, ordinal: u64) -> Option<&str> {
        let normalized = normalize_library_name(library);
        if !self.libraries.contains_key(&normalized) {
            let loaded = self.load(&normalized);
            self.libraries.insert(normalized.clone(), loaded);
        }
        self.libraries
            .get(&normalized)
            .and_then(Option::as_ref)
            .and_then(|ords| ords.get(&ordinal))
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Whether a load was attempted for `library` (successful or not).
    pub fn is_cached(&self, library: &str) -> bool {
        self.libraries.contains_key(&normalize_library_name(library))
    }

    /// Whether `library` was loaded successfully.
    pub fn is_loaded(&self, library: &str) -> bool {
        matches!(self.libraries.get(&normalize_library_name(library)), Some(Some(_)))
    }

    /// Number of libraries with a cache entry.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    fn load(&self, normalized: &str) -> Option<OrdinalMap> {
        let Some(path) = self.file_path(normalized) else {
            debug!(library = normalized, "no ordinals directory configured");
            return None;
        };
        match load_ordinal_file(&path) {
            Ok(map) => {
                debug!(
                    library = normalized,
                    path = %path.display(),
                    entries = map.len(),
                    "loaded ordinal file"
                );
                Some(map)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(library = normalized, path = %path.display(), "ordinal file not found");
                None
            }
            Err(err) => {
                warn!(
                    library = normalized,
                    path = %path.display(),
                    error = %err,
                    "failed to read ordinal file"
                );
                None
            }
        }
    }
}
