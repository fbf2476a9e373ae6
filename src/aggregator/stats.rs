//! Cycle statistics over a parsed trace.
//!
//! Used for the run summary log line and the JSON run report.

use crate::parser::{Direction, ParsedTrace, Record};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-direction cycle counts
///
/// **Public** - returned from calculate_cycle_stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStats {
    /// Total cycles (one per record)
    pub total: usize,

    /// Read cycles
    pub reads: usize,

    /// Write cycles
    pub writes: usize,

    /// Cycles without a data memory access
    pub idle: usize,

    /// Idle cycles that came from malformed access lines
    pub malformed: usize,

    /// Number of distinct addresses touched
    pub distinct_addresses: usize,
}

/// Count cycles by direction
///
/// **Public** - main entry point for statistics
pub fn calculate_cycle_stats(records: &[Record]) -> CycleStats {
    let mut stats = CycleStats {
        total: records.len(),
        ..CycleStats::default()
    };
    let mut addresses = HashSet::new();

    for record in records {
        match record.direction() {
            Direction::Read => stats.reads += 1,
            Direction::Write => stats.writes += 1,
            Direction::Neither => stats.idle += 1,
        }
        if let Some(address) = record.address() {
            addresses.insert(address.to_ascii_uppercase());
        }
    }
    stats.distinct_addresses = addresses.len();

    debug!("Cycle stats: {}", stats.summary());
    stats
}

/// Statistics for a whole parsed trace, including malformed lines
pub fn trace_stats(trace: &ParsedTrace) -> CycleStats {
    CycleStats {
        malformed: trace.malformed.len(),
        ..calculate_cycle_stats(trace.records.as_slice())
    }
}

impl CycleStats {
    /// Percentage of cycles that access data memory
    pub fn access_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            ((self.reads + self.writes) as f64 / self.total as f64) * 100.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Cycles: {} | Reads: {} | Writes: {} | Idle: {} | Malformed: {} | Access: {:.1}%",
            self.total,
            self.reads,
            self.writes,
            self.idle,
            self.malformed,
            self.access_percentage()
        )
    }
}
