//! Trace parser for annotated instruction logs.
//!
//! Every input line becomes one record. A line is a bus access when its
//! comment starts with a direction marker followed by the data byte and the
//! address:
//!
//! ```text
//! MOV AX, BX  ; R 3F 00A4
//! ST  X+, R2  ;w12 0100
//! NOP
//! ```
//!
//! Lines without a comment, or whose comment starts with anything other than
//! `r`/`R`/`w`/`W`, are idle cycles.

use super::record::{BusValue, Direction, Record};
use super::store::RecordStore;
use crate::utils::config::{ADDRESS_WIDTH, ALLOC_BATCH, COMMENT_DELIMITER, DATA_WIDTH};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Abort on the first malformed access line instead of idling it
    pub strict: bool,

    /// Records reserved each time the store fills up
    pub batch: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            batch: ALLOC_BATCH,
        }
    }
}

/// A read/write line whose fields could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,

    /// Human-readable description of the problem
    pub reason: String,
}

/// Result of parsing a complete trace
#[derive(Debug, Clone)]
pub struct ParsedTrace {
    /// One record per input line, in input order
    pub records: RecordStore,

    /// Number of lines read
    pub line_count: usize,

    /// Access lines that were demoted to idle cycles
    pub malformed: Vec<MalformedLine>,
}

/// Classify a single trace line
///
/// **Public** - used by `parse_trace` and by tests
///
/// # Returns
/// The record for this line, or a `MalformedLine` when the line carries a
/// read/write marker but its data or address field is truncated or not hex.
pub fn parse_line(line: usize, text: &str) -> Result<Record, MalformedLine> {
    let Some(pos) = text.find(COMMENT_DELIMITER) else {
        return Ok(Record::idle(line));
    };

    let comment = text[pos + COMMENT_DELIMITER.len_utf8()..].trim_start();
    let mut chars = comment.chars();
    let Some(direction) = chars.next().and_then(Direction::from_marker) else {
        return Ok(Record::idle(line));
    };

    let malformed = |field: &str, reason: String| MalformedLine {
        line,
        reason: format!("{} {} field {}", direction, field, reason),
    };

    let rest = chars.as_str().trim_start();
    let (data, rest) =
        take_hex_field(rest, DATA_WIDTH).map_err(|reason| malformed("data", reason))?;
    let (address, _) = take_hex_field(rest.trim_start(), ADDRESS_WIDTH)
        .map_err(|reason| malformed("address", reason))?;

    Ok(Record::access(
        line,
        direction,
        BusValue {
            data: data.to_string(),
            address: address.to_string(),
        },
    ))
}

/// Split a fixed-width hex field off the front of `text`
///
/// **Private** - internal helper for parse_line
fn take_hex_field(text: &str, width: usize) -> Result<(&str, &str), String> {
    let end = text
        .char_indices()
        .nth(width)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let field = &text[..end];

    if field.chars().count() < width {
        return Err(format!(
            "is truncated (expected {} characters, found {:?})",
            width, field
        ));
    }
    if !field.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("is not hexadecimal: {:?}", field));
    }

    Ok((field, &text[end..]))
}

/// Parse a trace from any buffered reader
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `reader` - Source of trace lines (LF or CRLF terminated)
/// * `options` - Parser switches
///
/// # Errors
/// * `ParseError::Io` - Reading failed
/// * `ParseError::AllocationFailure` - The record store could not grow
/// * `ParseError::MalformedRecord` - Malformed access line in strict mode
pub fn parse_trace<R: BufRead>(
    mut reader: R,
    options: &ParseOptions,
) -> Result<ParsedTrace, ParseError> {
    let mut records = RecordStore::with_batch(options.batch);
    let mut malformed = Vec::new();
    let mut line_count = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_count += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');

        let record = match parse_line(line_count, text) {
            Ok(record) => record,
            Err(bad) if options.strict => {
                return Err(ParseError::MalformedRecord {
                    line: bad.line,
                    reason: bad.reason,
                });
            }
            Err(bad) => {
                warn!("Line {}: {}; treating as idle cycle", bad.line, bad.reason);
                malformed.push(bad);
                Record::idle(line_count)
            }
        };

        records
            .push(record)
            .map_err(|_| ParseError::AllocationFailure {
                line: line_count,
                records: records.len(),
            })?;
    }

    debug!(
        "Parsed {} lines into {} records ({} malformed)",
        line_count,
        records.len(),
        malformed.len()
    );

    Ok(ParsedTrace {
        records,
        line_count,
        malformed,
    })
}

/// Open and parse a trace file
///
/// **Public** - used by the convert command
///
/// # Errors
/// * `ParseError::FileOpen` - The input path cannot be opened
/// * Anything `parse_trace` returns
pub fn parse_trace_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    parse_trace(BufReader::new(file), options)
}
