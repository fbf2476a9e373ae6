//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the binaries and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and classifying a trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot open input file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Out of memory at line {line} after {records} records")]
    AllocationFailure { line: usize, records: usize },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Errors that can occur while rendering the testbench stub
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Invalid testbench configuration: {0}")]
    InvalidConfig(String),

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Errors that can occur while decoding a generated stub
#[derive(Error, Debug)]
pub enum ReadbackError {
    #[error("Signal {0} not found in stub")]
    MissingSignal(String),

    #[error("Signal {signal} is malformed: {reason}")]
    MalformedSignal { signal: String, reason: String },

    #[error("Signals disagree at cycle {cycle}: {reason}")]
    Inconsistent { cycle: usize, reason: String },
}

/// Errors that can occur while expanding Intel HEX records
#[derive(Error, Debug)]
pub enum HexError {
    #[error("Cannot open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid HEX record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Raised when a generated stub does not decode back to the parsed records
#[derive(Error, Debug)]
#[error("Generated stub does not match parsed records: {0}")]
pub struct VerifyError(pub String);

// Process exit codes
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_FILE_OPEN: i32 = 3;
pub const EXIT_ALLOCATION: i32 = 4;
pub const EXIT_MALFORMED: i32 = 5;
pub const EXIT_VERIFY: i32 = 6;

/// Map an application error to the process exit code for its category
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(parse) = cause.downcast_ref::<ParseError>() {
            return match parse {
                ParseError::FileOpen { .. } => EXIT_FILE_OPEN,
                ParseError::AllocationFailure { .. } => EXIT_ALLOCATION,
                ParseError::MalformedRecord { .. } => EXIT_MALFORMED,
                ParseError::Io(_) => EXIT_FAILURE,
            };
        }
        if let Some(HexError::FileOpen { .. }) = cause.downcast_ref::<HexError>() {
            return EXIT_FILE_OPEN;
        }
        if let Some(OutputError::InvalidPath(_)) = cause.downcast_ref::<OutputError>() {
            return EXIT_FILE_OPEN;
        }
        if cause.downcast_ref::<VerifyError>().is_some() {
            return EXIT_VERIFY;
        }
    }
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_allocation() {
        let err = anyhow::Error::new(ParseError::AllocationFailure { line: 3, records: 2 });
        assert_eq!(exit_code_for(&err), EXIT_ALLOCATION);
    }

    #[test]
    fn test_exit_code_through_context() {
        let result: Result<(), ParseError> = Err(ParseError::FileOpen {
            path: PathBuf::from("missing.asm"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        let err = result.context("Failed to parse trace").unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_FILE_OPEN);
    }

    #[test]
    fn test_exit_code_unknown() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }
}
