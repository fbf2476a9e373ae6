//! asm2vec
//!
//! Converts annotated instruction traces into VHDL testbench test vectors.
//!
//! Every line of a trace is one cycle. Lines whose comment starts with a
//! read or write marker contribute the data byte and address that the CPU
//! under test is expected to put on (or read from) the data bus:
//!
//! ```text
//! LD  R0, X   ; R 3F 00A4
//! ST  Y, R1   ; W 12 0100
//! NOP
//! ```
//!
//! The crate also ships `hex2bin`, which expands Intel HEX program images
//! into binary instruction words for ROM initialisation.
//!
//! ## Getting Started
//!
//! ```bash
//! asm2vec program.asm cpu_test_tb.vhd
//! hex2bin program.hex program.txt
//! ```

pub mod aggregator;
pub mod commands;
pub mod emitter;
pub mod hexbin;
pub mod output;
pub mod parser;
pub mod utils;
