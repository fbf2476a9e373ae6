//! Convert command implementation.
//!
//! The convert command:
//! 1. Parses the annotated trace
//! 2. Calculates cycle statistics
//! 3. Renders (and optionally verifies) the testbench stub
//! 4. Writes output files

use crate::aggregator::{trace_stats, CycleStats};
use crate::emitter::{render_testbench, verify_stub, TestbenchConfig};
use crate::output::{prepare_path, write_report, write_text, ConversionReport};
use crate::parser::{parse_trace_file, ParseOptions};
use crate::utils::config::ALLOC_BATCH;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Annotated trace to read
    pub input: PathBuf,

    /// Testbench stub to write
    pub output: PathBuf,

    /// Output path for the JSON run report (optional)
    pub report: Option<PathBuf>,

    /// Testbench rendering options
    pub testbench_config: TestbenchConfig,

    /// Fail on malformed access lines instead of idling them
    pub strict: bool,

    /// Decode the generated stub and compare it with the parsed records
    pub verify: bool,

    /// Records reserved each time the record store fills up
    pub alloc_batch: usize,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            report: None,
            testbench_config: TestbenchConfig::default(),
            strict: false,
            verify: false,
            alloc_batch: ALLOC_BATCH,
        }
    }
}

/// What a successful conversion produced
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub lines_processed: usize,
    pub vectors_generated: usize,
    pub stats: CycleStats,
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// Nothing is written unless parsing and rendering both succeed and every
/// output path is usable.
///
/// # Errors
/// * Input file cannot be opened
/// * Record store allocation failure
/// * Malformed access line (strict mode only)
/// * Verification mismatch (verify mode only)
/// * File write errors
pub fn execute_convert(args: ConvertArgs) -> Result<ConvertOutcome> {
    let start_time = Instant::now();

    info!("Converting trace: {}", args.input.display());

    // Step 1: Parse trace
    info!("Step 1/4: Parsing trace...");
    let options = ParseOptions {
        strict: args.strict,
        batch: args.alloc_batch,
    };
    let trace = parse_trace_file(&args.input, &options).context("Failed to parse trace")?;

    debug!(
        "Parsed trace: {} lines, {} records",
        trace.line_count,
        trace.records.len()
    );

    // Step 2: Statistics
    info!("Step 2/4: Calculating cycle statistics...");
    let stats = trace_stats(&trace);
    info!("Cycle statistics: {}", stats.summary());

    // Step 3: Render stub
    info!("Step 3/4: Generating testbench stub...");
    let stub = render_testbench(trace.records.as_slice(), Some(&args.testbench_config))
        .context("Failed to generate testbench stub")?;

    if args.verify {
        verify_stub(&stub, trace.records.as_slice())
            .context("Generated stub failed verification")?;
        info!("✓ Stub decodes back to the parsed records");
    }

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");
    prepare_path(&args.output).context("Failed to write testbench stub")?;
    if let Some(report_path) = &args.report {
        prepare_path(report_path).context("Failed to write run report")?;
    }

    write_text(&stub, &args.output).context("Failed to write testbench stub")?;
    info!("✓ Stub written to: {}", args.output.display());

    if let Some(report_path) = &args.report {
        let report = ConversionReport::from_trace(&trace, &args.input, &args.output);
        write_report(&report, report_path).context("Failed to write run report")?;
        info!("✓ Report written to: {}", report_path.display());
    }

    println!("Lines processed: {}", trace.line_count);
    println!("Vectors generated: {}", trace.records.len());

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(ConvertOutcome {
        lines_processed: trace.line_count,
        vectors_generated: trace.records.len(),
        stats,
    })
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input trace");
    }

    if let Some(report) = &args.report {
        if report == &args.output || report == &args.input {
            anyhow::bail!("Report path must differ from the input and output paths");
        }
    }

    args.testbench_config
        .validate()
        .context("Invalid testbench options")?;

    Ok(())
}
