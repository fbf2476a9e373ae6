//! Intel HEX to binary instruction word expansion.
//!
//! Each data record `:LLAAAATT<data>CC` carries `LL` bytes. Bytes are paired
//! into little-endian 16-bit instruction words, and every word is written as
//! a 16-character string of `0`/`1`, most significant bit first.

use crate::utils::config::{HEX_CHECKSUM_WIDTH, HEX_DATA_OFFSET, HEX_DATA_RECORD};
use crate::utils::error::HexError;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Expanded contents of a HEX file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexExpansion {
    /// Binary instruction words in file order
    pub words: Vec<String>,

    /// Number of input lines read
    pub lines: usize,

    /// Non-data records that were skipped
    pub skipped_records: usize,
}

impl HexExpansion {
    /// One word per line, newline terminated
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.words.len() * 17);
        for word in &self.words {
            text.push_str(word);
            text.push('\n');
        }
        text
    }
}

/// Decoded fields of one HEX record
struct HexRecord {
    record_type: u8,
    data: Vec<u8>,
}

/// Expand one HEX record into binary words
///
/// **Public** - used by `expand_hex` and by tests
///
/// Non-data records and blank lines expand to nothing.
///
/// # Errors
/// * `HexError::InvalidRecord` - Missing start code, bad length or non-hex text
pub fn expand_line(line: usize, text: &str) -> Result<Vec<String>, HexError> {
    let text = text.trim_end();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let record = decode_record(line, text)?;
    if record.record_type != HEX_DATA_RECORD {
        debug!(
            "Line {}: skipping record type {:02X}",
            line, record.record_type
        );
        return Ok(Vec::new());
    }

    let pairs = record.data.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        warn!("Line {}: odd byte count, dropping trailing byte", line);
    }

    Ok(pairs
        .map(|pair| {
            let word = u16::from_le_bytes([pair[0], pair[1]]);
            format!("{:016b}", word)
        })
        .collect())
}

/// Validate and decode a record
///
/// **Private** - internal helper for expand_line
fn decode_record(line: usize, text: &str) -> Result<HexRecord, HexError> {
    let invalid = |reason: String| HexError::InvalidRecord { line, reason };

    let body = text
        .strip_prefix(':')
        .ok_or_else(|| invalid("missing ':' start code".to_string()))?;

    if !body.is_ascii() || body.len() % 2 != 0 {
        return Err(invalid("record must be an even number of hex digits".to_string()));
    }

    let bytes = (0..body.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&body[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| invalid(format!("not hexadecimal: {}", e)))?;

    // byte count, 2 address bytes, record type, checksum
    let header = (HEX_DATA_OFFSET - 1) / 2;
    if bytes.len() < header + HEX_CHECKSUM_WIDTH / 2 {
        return Err(invalid("record is too short".to_string()));
    }

    let count = bytes[0] as usize;
    let expected = header + count + HEX_CHECKSUM_WIDTH / 2;
    if bytes.len() != expected {
        return Err(invalid(format!(
            "byte count {} does not match record length",
            count
        )));
    }

    let checksum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if checksum != 0 {
        warn!("Line {}: checksum mismatch", line);
    }

    Ok(HexRecord {
        record_type: bytes[3],
        data: bytes[header..header + count].to_vec(),
    })
}

/// Expand every record of a HEX stream
///
/// **Public** - main entry point for expansion
pub fn expand_hex<R: BufRead>(reader: R) -> Result<HexExpansion, HexError> {
    let mut expansion = HexExpansion::default();

    for line in reader.lines() {
        let line = line?;
        expansion.lines += 1;

        let words = expand_line(expansion.lines, &line)?;
        if words.is_empty() && !line.trim().is_empty() {
            expansion.skipped_records += 1;
        }
        expansion.words.extend(words);
    }

    debug!(
        "Expanded {} lines into {} words",
        expansion.lines,
        expansion.words.len()
    );
    Ok(expansion)
}

/// Open and expand a HEX file
///
/// # Errors
/// * `HexError::FileOpen` - The input path cannot be opened
pub fn expand_hex_file(path: impl AsRef<Path>) -> Result<HexExpansion, HexError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| HexError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    expand_hex(BufReader::new(file))
}
