//! VHDL testbench stub generation.
//!
//! Renders the parsed records as five index-aligned test vector signals:
//! read and write strobe bit strings, the data bus values driven on reads,
//! the data bus values expected on writes and the expected address bus.

use crate::parser::{Direction, Record};
use crate::utils::config::{
    ADDRESS_EXPECT_FALLBACK, ADDRESS_EXPECT_SIGNAL, DATA_DRIVE_FALLBACK, DATA_DRIVE_SIGNAL,
    DATA_EXPECT_FALLBACK, DATA_EXPECT_SIGNAL, DEFAULT_ENTITY_NAME, DEFAULT_VECTORS_PER_LINE,
    READ_STROBE_SIGNAL, WRITE_STROBE_SIGNAL,
};
use crate::utils::error::EmitError;
use log::{info, warn};
use std::fmt::Write;

/// Spacing of array elements in the generated aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Pad live values to the width of the fallback literal so columns line up
    #[default]
    Aligned,
    /// Single space after every comma
    Compact,
}

/// Testbench configuration
#[derive(Debug, Clone)]
pub struct TestbenchConfig {
    pub entity_name: String,
    pub vectors_per_line: usize,
    pub layout: Layout,
}

impl Default for TestbenchConfig {
    fn default() -> Self {
        Self {
            entity_name: DEFAULT_ENTITY_NAME.to_string(),
            vectors_per_line: DEFAULT_VECTORS_PER_LINE,
            layout: Layout::Aligned,
        }
    }
}

impl TestbenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = name.into();
        self
    }

    pub fn with_vectors_per_line(mut self, count: usize) -> Self {
        self.vectors_per_line = count;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Check the configuration can produce valid VHDL
    pub fn validate(&self) -> Result<(), EmitError> {
        if self.vectors_per_line == 0 {
            return Err(EmitError::InvalidConfig(
                "vectors per line must be greater than 0".to_string(),
            ));
        }
        if !is_vhdl_identifier(&self.entity_name) {
            return Err(EmitError::InvalidConfig(format!(
                "'{}' is not a VHDL identifier",
                self.entity_name
            )));
        }
        Ok(())
    }
}

/// VHDL basic identifier: a letter, then letters, digits and single underscores
fn is_vhdl_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.contains("__")
        && !name.ends_with('_')
}

/// One array-valued signal of the testbench
struct ArraySignal {
    comment: &'static str,
    name: &'static str,
    array_type: &'static str,
    fallback: &'static str,
    live: fn(&Record) -> Option<&str>,
}

fn data_driven(record: &Record) -> Option<&str> {
    match record.direction() {
        Direction::Read => record.data(),
        _ => None,
    }
}

fn data_expected(record: &Record) -> Option<&str> {
    match record.direction() {
        Direction::Write => record.data(),
        _ => None,
    }
}

fn address_expected(record: &Record) -> Option<&str> {
    record.address()
}

const ARRAY_SIGNALS: [ArraySignal; 3] = [
    ArraySignal {
        comment: "supplied data bus values for each instruction (for read operations)",
        name: DATA_DRIVE_SIGNAL,
        array_type: "byte_array",
        fallback: DATA_DRIVE_FALLBACK,
        live: data_driven,
    },
    ArraySignal {
        comment: "expected data bus output values for each instruction (only has a value on writes)",
        name: DATA_EXPECT_SIGNAL,
        array_type: "byte_array",
        fallback: DATA_EXPECT_FALLBACK,
        live: data_expected,
    },
    ArraySignal {
        comment: "expected data address bus values for each instruction",
        name: ADDRESS_EXPECT_SIGNAL,
        array_type: "addr_array",
        fallback: ADDRESS_EXPECT_FALLBACK,
        live: address_expected,
    },
];

/// Generate the testbench stub for a sequence of records
///
/// **Public** - main entry point for stub generation
///
/// An empty record sequence produces a single idle placeholder cycle so
/// that every array keeps a valid `0 to 0` range.
///
/// # Errors
/// * `EmitError::InvalidConfig` - Bad wrap width or entity name
pub fn render_testbench(
    records: &[Record],
    config: Option<&TestbenchConfig>,
) -> Result<String, EmitError> {
    let config = config.cloned().unwrap_or_default();
    config.validate()?;

    if records.is_empty() {
        warn!("No records to emit, writing a single idle placeholder cycle");
    }
    info!("Generating testbench for {} cycles", records.len());

    let mut out = String::new();
    write_header(&mut out, &config.entity_name)?;

    write_strobe(
        &mut out,
        "expected data bus read strobe for each instruction",
        READ_STROBE_SIGNAL,
        records,
        Direction::Read,
    )?;
    write_strobe(
        &mut out,
        "expected data bus write strobe for each instruction",
        WRITE_STROBE_SIGNAL,
        records,
        Direction::Write,
    )?;

    for signal in &ARRAY_SIGNALS {
        write_array(&mut out, signal, records, &config)?;
    }

    out.push('\n');

    info!("Testbench generated successfully ({} bytes)", out.len());
    Ok(out)
}

/// Highest index of the generated arrays
fn last_index(records: &[Record]) -> usize {
    records.len().saturating_sub(1)
}

fn write_header(out: &mut String, entity: &str) -> Result<(), EmitError> {
    out.push_str("library ieee;\n");
    out.push_str("use ieee.std_logic_1164.all;\n");
    out.push_str("use ieee.std_logic_arith.all;\n");
    out.push_str("use ieee.std_logic_unsigned.all;\n");
    out.push_str("use ieee.numeric_std.all;\n");
    out.push('\n');
    out.push_str("library OpCodes;\n");
    out.push_str("use OpCodes.OpCodes.all;\n");
    out.push_str("\n\n");
    writeln!(out, "entity {} is", entity)?;
    writeln!(out, "end {};", entity)?;
    out.push_str("\n\n");
    writeln!(out, "architecture TB_ARCHITECTURE of {} is", entity)?;
    out.push_str("\n\n");
    out.push_str(
        "    -- Stimulus signals - signals mapped to the input and inout ports of tested entity\n",
    );
    out.push_str("    signal  Clock    :  std_logic;\n");
    out.push_str("    signal  Reset    :  std_logic;\n");
    out.push_str("    signal  DataDB   :  std_logic_vector(7 downto 0);\n");
    out.push('\n');
    out.push_str("    -- Observed signals - signals mapped to the output ports of tested entity\n");
    out.push_str("    signal  DataRd   :  std_logic;\n");
    out.push_str("    signal  DataWr   :  std_logic;\n");
    out.push_str("    signal  DataAB   :  std_logic_vector(15 downto 0);\n");
    out.push('\n');
    out.push_str("    --Signal used to stop clock signal generators\n");
    out.push_str("    signal  END_SIM  :  BOOLEAN := FALSE;\n");
    out.push('\n');
    out.push_str("    -- test value types\n");
    out.push_str(
        "    type  byte_array    is array (natural range <>) of std_logic_vector(7 downto 0);\n",
    );
    out.push_str(
        "    type  addr_array    is array (natural range <>) of std_logic_vector(15 downto 0);\n",
    );
    Ok(())
}

/// Active-low strobe bit string: '0' on cycles matching `active`
fn write_strobe(
    out: &mut String,
    comment: &str,
    name: &str,
    records: &[Record],
    active: Direction,
) -> Result<(), EmitError> {
    writeln!(out)?;
    writeln!(out, "-- {}", comment)?;
    writeln!(
        out,
        "signal  {:<16}:  std_logic_vector(0 to {}) :=",
        name,
        last_index(records)
    )?;

    let bits: String = if records.is_empty() {
        "1".to_string()
    } else {
        records
            .iter()
            .map(|r| if r.direction() == active { '0' } else { '1' })
            .collect()
    };
    writeln!(out, "    \"{}\";", bits)?;
    Ok(())
}

fn write_array(
    out: &mut String,
    signal: &ArraySignal,
    records: &[Record],
    config: &TestbenchConfig,
) -> Result<(), EmitError> {
    writeln!(out)?;
    writeln!(out, "-- {}", signal.comment)?;
    write!(
        out,
        "signal  {:<16}:  {}(0 to {}) := (",
        signal.name,
        signal.array_type,
        last_index(records)
    )?;

    if records.is_empty() {
        writeln!(out, "\n    0 => {} );", signal.fallback)?;
        return Ok(());
    }

    let last = records.len() - 1;
    for (index, record) in records.iter().enumerate() {
        if index % config.vectors_per_line == 0 {
            out.push_str("\n    ");
        }

        let element = match (signal.live)(record) {
            Some(value) => format!("X\"{}\"", value),
            None => signal.fallback.to_string(),
        };
        out.push_str(&element);

        if index == last {
            out.push_str(" );\n");
        } else {
            out.push(',');
            let padding = match config.layout {
                Layout::Aligned => signal.fallback.len().saturating_sub(element.len()) + 1,
                Layout::Compact => 1,
            };
            out.push_str(&" ".repeat(padding));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BusValue;

    fn access(line: usize, direction: Direction, data: &str, address: &str) -> Record {
        Record::access(
            line,
            direction,
            BusValue {
                data: data.to_string(),
                address: address.to_string(),
            },
        )
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_vhdl_identifier("cpu_test_tb"));
        assert!(is_vhdl_identifier("tb2"));
        assert!(!is_vhdl_identifier("2tb"));
        assert!(!is_vhdl_identifier("cpu__tb"));
        assert!(!is_vhdl_identifier("cpu_"));
        assert!(!is_vhdl_identifier(""));
        assert!(!is_vhdl_identifier("cpu-tb"));
    }

    #[test]
    fn test_zero_wrap_width_rejected() {
        let config = TestbenchConfig::new().with_vectors_per_line(0);
        assert!(render_testbench(&[], Some(&config)).is_err());
    }

    #[test]
    fn test_strobes_for_read_then_write() {
        let records = vec![
            access(1, Direction::Read, "3F", "00A4"),
            access(2, Direction::Write, "12", "0100"),
        ];
        let out = render_testbench(&records, None).unwrap();

        assert!(out.contains("signal  DataRdTestVals  :  std_logic_vector(0 to 1) :=\n    \"01\";\n"));
        assert!(out.contains("signal  DataWrTestVals  :  std_logic_vector(0 to 1) :=\n    \"10\";\n"));
    }

    #[test]
    fn test_aligned_spacing() {
        let records = vec![
            access(1, Direction::Read, "3F", "00A4"),
            Record::idle(2),
            access(3, Direction::Write, "12", "0100"),
        ];
        let out = render_testbench(&records, None).unwrap();

        assert!(out.contains("(\n    X\"3F\",      \"ZZZZZZZZ\", \"ZZZZZZZZ\" );\n"));
        assert!(out.contains("(\n    \"--------\", \"--------\", X\"12\" );\n"));
        assert!(out.contains(
            "(\n    X\"00A4\",            \"----------------\", X\"0100\" );\n"
        ));
    }

    #[test]
    fn test_compact_spacing() {
        let records = vec![
            access(1, Direction::Read, "3F", "00A4"),
            access(2, Direction::Read, "40", "00A5"),
        ];
        let config = TestbenchConfig::new().with_layout(Layout::Compact);
        let out = render_testbench(&records, Some(&config)).unwrap();

        assert!(out.contains("(\n    X\"3F\", X\"40\" );\n"));
        assert!(out.contains("(\n    X\"00A4\", X\"00A5\" );\n"));
    }

    #[test]
    fn test_wraps_every_n_elements() {
        let records: Vec<Record> = (1..=7).map(Record::idle).collect();
        let config = TestbenchConfig::new()
            .with_vectors_per_line(3)
            .with_layout(Layout::Compact);
        let out = render_testbench(&records, Some(&config)).unwrap();

        let expected = "byte_array(0 to 6) := (\n    \"ZZZZZZZZ\", \"ZZZZZZZZ\", \"ZZZZZZZZ\", \n    \"ZZZZZZZZ\", \"ZZZZZZZZ\", \"ZZZZZZZZ\", \n    \"ZZZZZZZZ\" );\n";
        assert!(out.contains(expected));
    }

    #[test]
    fn test_empty_uses_placeholder() {
        let out = render_testbench(&[], None).unwrap();

        assert!(out.contains("std_logic_vector(0 to 0) :=\n    \"1\";"));
        assert!(out.contains("byte_array(0 to 0) := (\n    0 => \"ZZZZZZZZ\" );"));
        assert!(out.contains("addr_array(0 to 0) := (\n    0 => \"----------------\" );"));
        assert!(!out.contains("-1"));
    }

    #[test]
    fn test_custom_entity_name() {
        let config = TestbenchConfig::new().with_entity_name("avr_tb");
        let out = render_testbench(&[Record::idle(1)], Some(&config)).unwrap();
        assert!(out.contains("entity avr_tb is\nend avr_tb;\n"));
        assert!(out.contains("architecture TB_ARCHITECTURE of avr_tb is\n"));
    }
}
