use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use names_core::services::backends::load_image_file;
use names_core::services::report::NameReport;
use names_core::sources::{
    load_debug_info, load_names_config, DebugInfo, Demangler, NamesConfig, NullDemangler,
    RustDemangler,
};
use names_core::{NameRegistryProvider, RegistrySources, SessionId};
use serde::Serialize;
use tracing::{debug, info};

use crate::sha256_file;

/// Inputs for `dump`.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    pub binary: PathBuf,
    pub config: Option<PathBuf>,
    pub debug_info: Option<PathBuf>,
    /// Overrides `parameters.ordinals_directory` from the config.
    pub ordinals: Option<PathBuf>,
    pub demangle: bool,
}

/// Everything `dump --json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct DumpOutput {
    pub binary: String,
    pub sha256: String,
    pub format: String,
    pub generated_at: String,
    pub names: NameReport,
}

fn load_config(path: Option<&Path>) -> Result<NamesConfig> {
    match path {
        Some(path) => load_names_config(path)
            .with_context(|| format!("Failed to load names config {}", path.display())),
        None => Ok(NamesConfig::default()),
    }
}

fn load_debug(path: Option<&Path>) -> Result<Option<DebugInfo>> {
    path.map(|path| {
        load_debug_info(path)
            .with_context(|| format!("Failed to load debug info {}", path.display()))
    })
    .transpose()
}

/// Build a registry for one binary and render it as a report.
pub fn build_dump(options: &DumpOptions) -> Result<DumpOutput> {
    if !options.binary.is_file() {
        return Err(anyhow!("Binary file does not exist: {}", options.binary.display()));
    }

    let mut config = load_config(options.config.as_deref())?;
    if let Some(dir) = &options.ordinals {
        debug!(ordinals = %dir.display(), "overriding ordinals directory");
        config.parameters.ordinals_directory = Some(dir.clone());
    }
    let debug = load_debug(options.debug_info.as_deref())?;
    let image = load_image_file(&options.binary)
        .with_context(|| format!("Failed to load image {}", options.binary.display()))?;
    let demangler: Arc<dyn Demangler> =
        if options.demangle { Arc::new(RustDemangler) } else { Arc::new(NullDemangler) };

    let mut sources = RegistrySources::new(&config, &image, demangler);
    if let Some(debug) = &debug {
        sources = sources.with_debug(debug);
    }

    let mut provider = NameRegistryProvider::new();
    let session = SessionId::next();
    let registry = provider
        .create(session, sources)
        .ok_or_else(|| anyhow!("Failed to create name registry for {}", options.binary.display()))?;
    let names = NameReport::from_registry(registry);
    info!(
        %session,
        binary = %options.binary.display(),
        format = %image.format,
        named_addresses = names.len(),
        candidates = registry.candidate_count(),
        "built name report"
    );

    Ok(DumpOutput {
        binary: options.binary.display().to_string(),
        sha256: sha256_file(&options.binary)?,
        format: image.format.clone(),
        generated_at: Utc::now().to_rfc3339(),
        names,
    })
}

/// Print every named address of a binary with its ranked candidates.
pub fn dump_command(options: &DumpOptions, json: bool) -> Result<()> {
    let output = build_dump(options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Binary: {} ({})", output.binary, output.format);
    println!("SHA-256: {}", output.sha256);
    println!("Named addresses: {}", output.names.len());
    for entry in &output.names.entries {
        match &entry.demangled {
            Some(demangled) => {
                println!("{}  {}  [{}]  {}", entry.address, entry.preferred, entry.kind, demangled)
            }
            None => println!("{}  {}  [{}]", entry.address, entry.preferred, entry.kind),
        }
        for candidate in entry.candidates.iter().skip(1) {
            println!("    - {} ({})", candidate.name, candidate.kind);
        }
    }

    Ok(())
}
