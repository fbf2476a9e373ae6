//! Expand command implementation.
//!
//! Turns an Intel HEX program image into one binary instruction word per line.

use crate::hexbin::{expand_hex_file, HexExpansion};
use crate::output::write_text;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the expand command
#[derive(Debug, Clone, Default)]
pub struct ExpandArgs {
    /// Intel HEX file to read
    pub input: PathBuf,

    /// Binary word listing to write
    pub output: PathBuf,
}

/// Execute the expand command
///
/// **Public** - main entry point called from the hex2bin binary
pub fn execute_expand(args: ExpandArgs) -> Result<HexExpansion> {
    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input file");
    }

    info!("Expanding HEX file: {}", args.input.display());
    let expansion = expand_hex_file(&args.input).context("Failed to expand HEX file")?;

    write_text(&expansion.to_text(), &args.output).context("Failed to write binary words")?;

    info!(
        "✓ {} words from {} lines written to: {} ({} records skipped)",
        expansion.words.len(),
        expansion.lines,
        args.output.display(),
        expansion.skipped_records
    );
    Ok(expansion)
}
