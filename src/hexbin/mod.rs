//! Intel HEX expansion into binary instruction words.

pub mod expander;

pub use expander::{expand_hex, expand_hex_file, expand_line, HexExpansion};
