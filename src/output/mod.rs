//! Output writers for generated stubs and run reports.
//!
//! This module handles writing data to disk:
//! - VHDL testbench stubs and expanded instruction words
//! - JSON run reports

pub mod json;
pub mod schema;
pub mod text;

// Re-export main functions
pub use json::{read_report, write_report};
pub use schema::ConversionReport;
pub use text::{prepare_path, validate_path, write_text};
