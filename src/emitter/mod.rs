//! Testbench stub generation and decoding.
//!
//! This module provides:
//! - VHDL test vector rendering from parsed records
//! - Decoding of generated stubs back into bus cycles

pub mod readback;
pub mod testbench;

pub use readback::{decode_stub, verify_stub, DecodedCycle};
pub use testbench::{render_testbench, Layout, TestbenchConfig};
