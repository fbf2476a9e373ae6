//! Record types produced by the trace parser.
//!
//! One record is produced per input line. The position of a record in the
//! store is its cycle index in the generated testbench.

use std::fmt;

/// Memory access classification of a trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The instruction reads a byte from data memory
    Read,
    /// The instruction writes a byte to data memory
    Write,
    /// No data memory access on this cycle
    Neither,
}

impl Direction {
    /// Classify a direction marker character (case-insensitive)
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'r' | 'R' => Some(Direction::Read),
            'w' | 'W' => Some(Direction::Write),
            _ => None,
        }
    }

    pub fn is_access(self) -> bool {
        !matches!(self, Direction::Neither)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Read => "read",
            Direction::Write => "write",
            Direction::Neither => "idle",
        };
        f.write_str(name)
    }
}

/// Data and address fields of a bus access, kept verbatim from the trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusValue {
    /// Two hex digits of data
    pub data: String,

    /// Four hex digits of address
    pub address: String,
}

/// A single classified trace line
///
/// `bus` is present exactly when `direction` is `Read` or `Write`; the
/// constructors are the only way to build a record, which keeps that pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the input trace
    pub line: usize,

    direction: Direction,
    bus: Option<BusValue>,
}

impl Record {
    /// A cycle with no data memory access
    pub fn idle(line: usize) -> Self {
        Self {
            line,
            direction: Direction::Neither,
            bus: None,
        }
    }

    /// A read or write cycle; an idle direction discards the bus value
    pub fn access(line: usize, direction: Direction, bus: BusValue) -> Self {
        let bus = direction.is_access().then_some(bus);
        Self { line, direction, bus }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bus(&self) -> Option<&BusValue> {
        self.bus.as_ref()
    }

    /// Data value, only for reads and writes
    pub fn data(&self) -> Option<&str> {
        self.bus.as_ref().map(|b| b.data.as_str())
    }

    /// Address value, only for reads and writes
    pub fn address(&self) -> Option<&str> {
        self.bus.as_ref().map(|b| b.address.as_str())
    }
}
