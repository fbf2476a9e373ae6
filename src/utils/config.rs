//! Configuration and constants for the converters.

/// Current run report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Number of records the store reserves room for at a time
pub const ALLOC_BATCH: usize = 200;

/// Comment delimiter that introduces the bus annotation
pub const COMMENT_DELIMITER: char = ';';

// Fixed field widths of the bus annotation (in characters)
pub const DATA_WIDTH: usize = 2;
pub const ADDRESS_WIDTH: usize = 4;

/// Array elements per output line in the generated aggregates
pub const DEFAULT_VECTORS_PER_LINE: usize = 5;

/// Entity name used for the generated testbench
pub const DEFAULT_ENTITY_NAME: &str = "cpu_test_tb";

// Fallback literals for cycles that carry no live value
pub const DATA_DRIVE_FALLBACK: &str = "\"ZZZZZZZZ\"";
pub const DATA_EXPECT_FALLBACK: &str = "\"--------\"";
pub const ADDRESS_EXPECT_FALLBACK: &str = "\"----------------\"";

// Generated signal names
pub const READ_STROBE_SIGNAL: &str = "DataRdTestVals";
pub const WRITE_STROBE_SIGNAL: &str = "DataWrTestVals";
pub const DATA_DRIVE_SIGNAL: &str = "DataDBVals";
pub const DATA_EXPECT_SIGNAL: &str = "DataDBTestVals";
pub const ADDRESS_EXPECT_SIGNAL: &str = "DataABTestVals";

// Intel HEX record layout
pub const HEX_DATA_OFFSET: usize = 9;
pub const HEX_CHECKSUM_WIDTH: usize = 2;
pub const HEX_DATA_RECORD: u8 = 0x00;
