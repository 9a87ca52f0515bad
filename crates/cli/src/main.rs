use anyhow::Result;
use binary_names::commands::{
    dump_command, generate_name_command, resolve_ordinal_command, DumpOptions,
};
use binary_names::init_logging;
use clap::{Parser, Subcommand};

/// Name resolution for reverse-engineered binaries.
///
/// This CLI is a thin wrapper around `names-core` (exposed in code as `names_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "binary-names",
    version,
    about = "Aggregate and rank candidate names for addresses in a binary",
    long_about = None
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect names for a binary and print the preferred name per address.
    ///
    /// Sources, in order: the names config, debug info, then the image's
    /// import/export/symbol tables, entry point and sections.
    Dump {
        /// Path to the binary (ELF, PE or Mach-O).
        #[arg(long)]
        binary: String,

        /// Names config (JSON or YAML).
        #[arg(long)]
        config: Option<String>,

        /// Extracted debug info (JSON or YAML).
        #[arg(long)]
        debug_info: Option<String>,

        /// Directory with `<library>.ord` files. Overrides the config.
        #[arg(long)]
        ordinals: Option<String>,

        /// Show demangled forms of mangled Rust names.
        #[arg(long, default_value_t = false)]
        demangle: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Look up the function name of an ordinal import.
    ResolveOrdinal {
        /// Directory with `<library>.ord` files.
        #[arg(long)]
        ordinals: String,

        /// Library name (e.g. `WS2_32.dll`).
        #[arg(long)]
        library: String,

        /// Ordinal number.
        #[arg(long)]
        ordinal: u64,
    },

    /// Print the generated name for an address.
    GenerateName {
        /// Address, hex (`0x401000`) or decimal.
        #[arg(long)]
        address: String,

        /// Generate a basic-block label instead of a function name.
        #[arg(long, default_value_t = false)]
        basic_block: bool,

        /// Use the IDA-compatible function prefix.
        #[arg(long, default_value_t = false)]
        ida: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Dump { binary, config, debug_info, ordinals, demangle, json } => {
            let options = DumpOptions {
                binary: binary.into(),
                config: config.map(Into::into),
                debug_info: debug_info.map(Into::into),
                ordinals: ordinals.map(Into::into),
                demangle,
            };
            dump_command(&options, json)?
        }
        Command::ResolveOrdinal { ordinals, library, ordinal } => {
            resolve_ordinal_command(&ordinals, &library, ordinal)?
        }
        Command::GenerateName { address, basic_block, ida } => {
            generate_name_command(&address, basic_block, ida)?
        }
    }

    Ok(())
}
