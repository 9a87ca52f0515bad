//! Fixed names and generators for addresses that lack a source name.
//!
//! The registry never falls back to these on its own; callers that get the
//! invalid sentinel back use them to synthesize a name from the address.

use crate::model::Address;

/// Synthetic name for the program entry point, whatever its provenance.
pub const ENTRY_POINT_NAME: &str = "entry_point";

pub const GENERATED_FUNCTION_PREFIX: &str = "function_";

/// Function prefix used when output must stay compatible with IDA naming.
pub const GENERATED_FUNCTION_PREFIX_IDA: &str = "ida_";

pub const GENERATED_BASIC_BLOCK_PREFIX: &str = "dec_label_pc_";

pub const GENERATED_IMPORT_PREFIX: &str = "imported_function_ord_";

/// Exact-match aliases applied to every candidate name.
const NAME_ALIASES: &[(&str, &str)] = &[("_main", "main")];

/// `function_<hex>`, or `ida_<hex>` in IDA-compatible mode.
pub fn generate_function_name(address: Address, ida: bool) -> String {
    let prefix = if ida { GENERATED_FUNCTION_PREFIX_IDA } else { GENERATED_FUNCTION_PREFIX };
    format!("{prefix}{}", address.to_hex_string())
}

pub fn generate_basic_block_name(address: Address) -> String {
    format!("{GENERATED_BASIC_BLOCK_PREFIX}{}", address.to_hex_string())
}

/// Placeholder for an import that is only known by ordinal, e.g. `imported_function_ord_7`.
pub fn generate_import_name(ordinal: u64) -> String {
    format!("{GENERATED_IMPORT_PREFIX}{ordinal}")
}

/// Apply the alias table; anything else is returned verbatim.
pub fn normalize_name(text: String) -> String {
    match NAME_ALIASES.iter().find(|(from, _)| *from == text) {
        Some((_, to)) => (*to).to_string(),
        None => text,
    }
}
