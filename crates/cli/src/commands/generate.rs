use anyhow::{Context, Result};
use names_core::model::Address;
use names_core::naming::{generate_basic_block_name, generate_function_name};

/// Synthetic name for `address`, as used when no source names it.
pub fn generated_name(address: Address, basic_block: bool, ida: bool) -> String {
    if basic_block {
        generate_basic_block_name(address)
    } else {
        generate_function_name(address, ida)
    }
}

/// Print the generated function or basic-block name for an address.
pub fn generate_name_command(address: &str, basic_block: bool, ida: bool) -> Result<()> {
    let address: Address =
        address.parse().with_context(|| format!("Failed to parse address '{address}'"))?;
    println!("{}", generated_name(address, basic_block, ida));
    Ok(())
}
