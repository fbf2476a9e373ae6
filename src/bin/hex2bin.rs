//! hex2bin CLI
//!
//! Expands an Intel HEX program image into one 16-bit binary instruction
//! word per line.

use anyhow::Result;
use asm2vec::commands::{execute_expand, ExpandArgs};
use asm2vec::utils::error::exit_code_for;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

/// hex2bin - Intel HEX to binary instruction words
#[derive(Parser, Debug)]
#[command(name = "hex2bin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Intel HEX file to read
    input: PathBuf,

    /// Output file, one binary word per line
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(err) = run(cli) {
        println!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let expansion = execute_expand(ExpandArgs {
        input: cli.input,
        output: cli.output,
    })?;

    println!("Lines processed: {}", expansion.lines);
    println!("Words generated: {}", expansion.words.len());
    Ok(())
}
