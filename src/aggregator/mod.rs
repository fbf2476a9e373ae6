//! Aggregation of parsed records into cycle statistics.

pub mod stats;

// Re-export main types and functions
pub use stats::{calculate_cycle_stats, trace_stats, CycleStats};
