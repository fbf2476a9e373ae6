//! asm2vec CLI
//!
//! Generates a VHDL testbench stub with read/write strobe, data bus and
//! address bus test vectors from an annotated instruction trace.

use anyhow::Result;
use asm2vec::commands::{execute_convert, validate_args, ConvertArgs};
use asm2vec::emitter::{Layout, TestbenchConfig};
use asm2vec::utils::config::{DEFAULT_ENTITY_NAME, DEFAULT_VECTORS_PER_LINE};
use asm2vec::utils::error::exit_code_for;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

/// asm2vec - trace log to VHDL test vectors
#[derive(Parser, Debug)]
#[command(name = "asm2vec")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Annotated instruction trace to read
    input: PathBuf,

    /// Testbench stub to write
    output: PathBuf,

    /// Entity name of the generated testbench
    #[arg(long, default_value = DEFAULT_ENTITY_NAME)]
    entity: String,

    /// Array elements per line in the generated aggregates
    #[arg(long, default_value_t = DEFAULT_VECTORS_PER_LINE)]
    per_line: usize,

    /// Single-space separators instead of column-aligned ones
    #[arg(long)]
    compact: bool,

    /// Fail on malformed read/write lines instead of treating them as idle
    #[arg(long)]
    strict: bool,

    /// Decode the generated stub and check it against the parsed trace
    #[arg(long)]
    verify: bool,

    /// Output path for a JSON run report (optional)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Diagnostics go to stdout next to the run summary
    if let Err(err) = run(cli) {
        println!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let layout = if cli.compact {
        Layout::Compact
    } else {
        Layout::Aligned
    };

    let args = ConvertArgs {
        input: cli.input,
        output: cli.output,
        report: cli.report,
        testbench_config: TestbenchConfig::new()
            .with_entity_name(cli.entity)
            .with_vectors_per_line(cli.per_line)
            .with_layout(layout),
        strict: cli.strict,
        verify: cli.verify,
        ..Default::default()
    };

    // Validate args first
    validate_args(&args)?;

    execute_convert(args)?;
    Ok(())
}
