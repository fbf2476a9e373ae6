//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod expand;

// Re-export main command functions
pub use convert::{execute_convert, validate_args, ConvertArgs, ConvertOutcome};
pub use expand::{execute_expand, ExpandArgs};
