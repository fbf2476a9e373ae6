//! Plain text output writer.
//!
//! Writes generated testbench stubs and expanded instruction words to files.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write generated text to a file
///
/// **Public** - main entry point for text output
///
/// The content is fully rendered before this is called, so a failure here
/// never follows a partially generated stub.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_text(content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing output to: {}", output_path.display());

    prepare_path(output_path)?;

    let file = File::create(output_path).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create {}: {}", output_path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Output written successfully ({} bytes)", content.len());
    Ok(())
}

/// Validate an output path and create its parent directories
///
/// **Public** - lets callers check every output before writing any of them
pub fn prepare_path(path: &Path) -> Result<(), OutputError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validate that an output path is usable
///
/// **Public** - shared by all writers
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(ext) = path.extension() {
        if !["vhd", "vhdl", "txt", "bin"].iter().any(|known| ext == *known) {
            debug!("Unusual extension for a text output: {}", path.display());
        }
    }

    Ok(())
}
