//! Trace parsing and record definitions.
//!
//! This module handles:
//! - Reading annotated instruction traces line by line
//! - Classifying each line as read, write or idle
//! - Extracting the data and address fields
//! - Storing records in cycle order

pub mod record;
pub mod store;
pub mod trace;

// Re-export main types
pub use record::{BusValue, Direction, Record};
pub use store::RecordStore;
pub use trace::{parse_line, parse_trace, parse_trace_file, MalformedLine, ParseOptions, ParsedTrace};
