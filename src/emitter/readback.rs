//! Decoder for generated testbench stubs.
//!
//! Reads the five test vector signals back out of a stub, cross-checks them
//! against each other and reconstructs the bus cycle sequence. The convert
//! command uses this to verify its own output.

use crate::parser::{Direction, Record};
use crate::utils::config::{
    ADDRESS_EXPECT_FALLBACK, ADDRESS_EXPECT_SIGNAL, DATA_DRIVE_FALLBACK, DATA_DRIVE_SIGNAL,
    DATA_EXPECT_FALLBACK, DATA_EXPECT_SIGNAL, READ_STROBE_SIGNAL, WRITE_STROBE_SIGNAL,
};
use crate::utils::error::{ReadbackError, VerifyError};
use log::debug;

/// One cycle reconstructed from a stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCycle {
    pub direction: Direction,
    pub data: Option<String>,
    pub address: Option<String>,
}

/// A single aggregate element
#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Live(String),
    Fallback,
}

/// Contents of an array aggregate
enum Aggregate {
    Elements(Vec<Element>),
    /// `0 => fallback` single placeholder of an empty trace
    Placeholder,
}

/// Decode every cycle of a generated stub
///
/// **Public** - used for output verification and round-trip tests
///
/// A stub generated from an empty trace decodes to no cycles.
///
/// # Errors
/// * `ReadbackError::MissingSignal` - A test vector signal is absent
/// * `ReadbackError::MalformedSignal` - A signal value cannot be parsed
/// * `ReadbackError::Inconsistent` - Signals disagree about a cycle
pub fn decode_stub(text: &str) -> Result<Vec<DecodedCycle>, ReadbackError> {
    let read_strobe = strobe_bits(text, READ_STROBE_SIGNAL)?;
    let write_strobe = strobe_bits(text, WRITE_STROBE_SIGNAL)?;
    let drive = aggregate(text, DATA_DRIVE_SIGNAL, DATA_DRIVE_FALLBACK)?;
    let expect = aggregate(text, DATA_EXPECT_SIGNAL, DATA_EXPECT_FALLBACK)?;
    let address = aggregate(text, ADDRESS_EXPECT_SIGNAL, ADDRESS_EXPECT_FALLBACK)?;

    let (drive, expect, address) = match (drive, expect, address) {
        (Aggregate::Placeholder, Aggregate::Placeholder, Aggregate::Placeholder) => {
            debug!("Stub holds only the idle placeholder cycle");
            return Ok(Vec::new());
        }
        (Aggregate::Elements(d), Aggregate::Elements(e), Aggregate::Elements(a)) => (d, e, a),
        _ => {
            return Err(ReadbackError::Inconsistent {
                cycle: 0,
                reason: "placeholder and populated arrays are mixed".to_string(),
            })
        }
    };

    let count = read_strobe.len();
    for (name, len) in [
        (WRITE_STROBE_SIGNAL, write_strobe.len()),
        (DATA_DRIVE_SIGNAL, drive.len()),
        (DATA_EXPECT_SIGNAL, expect.len()),
        (ADDRESS_EXPECT_SIGNAL, address.len()),
    ] {
        if len != count {
            return Err(ReadbackError::MalformedSignal {
                signal: name.to_string(),
                reason: format!("has {} elements, expected {}", len, count),
            });
        }
    }

    let mut cycles = Vec::with_capacity(count);
    for cycle in 0..count {
        let direction = match (read_strobe[cycle], write_strobe[cycle]) {
            ('0', '0') => {
                return Err(ReadbackError::Inconsistent {
                    cycle,
                    reason: "both read and write strobes are active".to_string(),
                })
            }
            ('0', _) => Direction::Read,
            (_, '0') => Direction::Write,
            _ => Direction::Neither,
        };

        let check = |signal: &str, element: &Element, expect_live: bool| {
            let is_live = matches!(element, Element::Live(_));
            if is_live == expect_live {
                Ok(())
            } else {
                Err(ReadbackError::Inconsistent {
                    cycle,
                    reason: format!(
                        "{} {} a value on a {} cycle",
                        signal,
                        if is_live { "carries" } else { "lacks" },
                        direction
                    ),
                })
            }
        };
        check(DATA_DRIVE_SIGNAL, &drive[cycle], direction == Direction::Read)?;
        check(DATA_EXPECT_SIGNAL, &expect[cycle], direction == Direction::Write)?;
        check(ADDRESS_EXPECT_SIGNAL, &address[cycle], direction.is_access())?;

        let data = match direction {
            Direction::Read => live_value(&drive[cycle]),
            Direction::Write => live_value(&expect[cycle]),
            Direction::Neither => None,
        };
        cycles.push(DecodedCycle {
            direction,
            data,
            address: live_value(&address[cycle]),
        });
    }

    debug!("Decoded {} cycles from stub", cycles.len());
    Ok(cycles)
}

/// Check that a stub describes exactly the given records
///
/// **Public** - used by the convert command's `--verify` option
pub fn verify_stub(text: &str, records: &[Record]) -> Result<(), VerifyError> {
    let cycles = decode_stub(text).map_err(|e| VerifyError(e.to_string()))?;

    if cycles.len() != records.len() {
        return Err(VerifyError(format!(
            "stub has {} cycles but {} records were parsed",
            cycles.len(),
            records.len()
        )));
    }

    for (index, (cycle, record)) in cycles.iter().zip(records).enumerate() {
        let matches = cycle.direction == record.direction()
            && cycle.data.as_deref() == record.data()
            && cycle.address.as_deref() == record.address();
        if !matches {
            return Err(VerifyError(format!(
                "cycle {} (line {}) decodes as {:?}",
                index, record.line, cycle
            )));
        }
    }
    Ok(())
}

fn live_value(element: &Element) -> Option<String> {
    match element {
        Element::Live(value) => Some(value.clone()),
        Element::Fallback => None,
    }
}

/// Text following the `:=` of a signal declaration
fn signal_value<'a>(text: &'a str, signal: &str) -> Result<&'a str, ReadbackError> {
    let declaration = format!("signal  {}", signal);
    let start = text
        .match_indices(&declaration)
        .map(|(index, _)| index + declaration.len())
        .find(|&end| {
            text[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == ':')
        })
        .ok_or_else(|| ReadbackError::MissingSignal(signal.to_string()))?;

    let rest = &text[start..];
    let assign = rest.find(":=").ok_or_else(|| ReadbackError::MalformedSignal {
        signal: signal.to_string(),
        reason: "missing ':='".to_string(),
    })?;
    Ok(&rest[assign + 2..])
}

fn strobe_bits(text: &str, signal: &str) -> Result<Vec<char>, ReadbackError> {
    let malformed = |reason: &str| ReadbackError::MalformedSignal {
        signal: signal.to_string(),
        reason: reason.to_string(),
    };

    let value = signal_value(text, signal)?;
    let open = value.find('"').ok_or_else(|| malformed("missing bit string"))?;
    let body = &value[open + 1..];
    let close = body.find('"').ok_or_else(|| malformed("unterminated bit string"))?;
    let bits: Vec<char> = body[..close].chars().collect();

    if bits.is_empty() || bits.iter().any(|&c| c != '0' && c != '1') {
        return Err(malformed("bit string must be a non-empty run of 0 and 1"));
    }
    Ok(bits)
}

fn aggregate(text: &str, signal: &str, fallback: &str) -> Result<Aggregate, ReadbackError> {
    let malformed = |reason: String| ReadbackError::MalformedSignal {
        signal: signal.to_string(),
        reason,
    };

    let value = signal_value(text, signal)?;
    let open = value
        .find('(')
        .ok_or_else(|| malformed("missing '('".to_string()))?;
    let body = &value[open + 1..];
    let close = body
        .find(");")
        .ok_or_else(|| malformed("missing ');'".to_string()))?;
    let body = &body[..close];

    if let Some((_, placeholder)) = body.split_once("=>") {
        if placeholder.trim() == fallback {
            return Ok(Aggregate::Placeholder);
        }
        return Err(malformed(format!("unexpected named element {:?}", body.trim())));
    }

    let elements = body
        .split(',')
        .map(str::trim)
        .map(|item| {
            if item == fallback {
                Ok(Element::Fallback)
            } else if let Some(hex) = item
                .strip_prefix("X\"")
                .and_then(|rest| rest.strip_suffix('"'))
            {
                Ok(Element::Live(hex.to_string()))
            } else {
                Err(malformed(format!("unexpected element {:?}", item)))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Aggregate::Elements(elements))
}
