use std::path::Path;

use anyhow::{anyhow, Result};
use names_core::services::ordinals::{normalize_library_name, OrdinalCache};
use tracing::debug;

/// Look up one ordinal in `<dir>/<library>.ord`.
pub fn resolve_ordinal(ordinals_dir: &Path, library: &str, ordinal: u64) -> Option<String> {
    let mut cache = OrdinalCache::new(Some(ordinals_dir.to_path_buf()));
    let resolved = cache.resolve(library, ordinal).map(str::to_string);
    debug!(library, ordinal, resolved = resolved.is_some(), "ordinal lookup");
    resolved
}

/// Print the function name for an ordinal; errors if it cannot be resolved.
pub fn resolve_ordinal_command(ordinals_dir: &str, library: &str, ordinal: u64) -> Result<()> {
    match resolve_ordinal(Path::new(ordinals_dir), library, ordinal) {
        Some(name) => {
            println!("{name}");
            Ok(())
        }
        None => Err(anyhow!(
            "Ordinal {} not found for library '{}' in {}",
            ordinal,
            normalize_library_name(library),
            ordinals_dir
        )),
    }
}
