//! Run report JSON schema.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{trace_stats, CycleStats};
use crate::parser::{MalformedLine, ParsedTrace};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one conversion run written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input trace path
    pub input: String,

    /// Generated stub path
    pub output: String,

    /// Number of input lines read
    pub lines_processed: usize,

    /// Number of test vectors emitted
    pub vectors_generated: usize,

    /// Cycle counts by direction
    pub cycles: CycleStats,

    /// Access lines demoted to idle cycles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed: Vec<MalformedLine>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

impl ConversionReport {
    /// Build a report for a parsed trace
    ///
    /// **Public** - used by the convert command
    pub fn from_trace(trace: &ParsedTrace, input: &Path, output: &Path) -> Self {
        use chrono::Utc;

        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            lines_processed: trace.line_count,
            vectors_generated: trace.records.len(),
            cycles: trace_stats(trace),
            malformed: trace.malformed.clone(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}
