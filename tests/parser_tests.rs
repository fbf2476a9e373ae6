use asm2vec::parser::{parse_line, parse_trace, Direction, ParseOptions};
use pretty_assertions::assert_eq;

#[test]
fn test_read_line_scenario() {
    let record = parse_line(1, "MOV AX, BX  ; R 3F 00A4").unwrap();

    assert_eq!(record.direction(), Direction::Read);
    assert_eq!(record.data(), Some("3F"));
    assert_eq!(record.address(), Some("00A4"));
}

#[test]
fn test_nop_scenario() {
    let record = parse_line(1, "NOP").unwrap();

    assert_eq!(record.direction(), Direction::Neither);
    assert_eq!(record.data(), None);
    assert_eq!(record.address(), None);
}

#[test]
fn test_marker_right_after_delimiter() {
    let record = parse_line(1, "STS $0100, R16 ;W5A 0100").unwrap();

    assert_eq!(record.direction(), Direction::Write);
    assert_eq!(record.data(), Some("5A"));
    assert_eq!(record.address(), Some("0100"));
}

#[test]
fn test_only_first_delimiter_counts() {
    let record = parse_line(1, "LDI R16, ';' ; r 01 0002").unwrap();
    assert_eq!(record.direction(), Direction::Neither);
}

#[test]
fn test_line_count_matches_records() {
    let input = "NOP\nLD R0, X ; R 3F 00A4\n\nST Y, R1 ; W 12 0100\nRJMP start";
    let parsed = parse_trace(input.as_bytes(), &ParseOptions::default()).unwrap();

    assert_eq!(parsed.line_count, 5);
    assert_eq!(parsed.records.len(), parsed.line_count);
    assert_eq!(
        parsed.records.directions(),
        vec![
            Direction::Neither,
            Direction::Read,
            Direction::Neither,
            Direction::Write,
            Direction::Neither,
        ]
    );
}

#[test]
fn test_empty_input() {
    let parsed = parse_trace(&b""[..], &ParseOptions::default()).unwrap();

    assert_eq!(parsed.line_count, 0);
    assert!(parsed.records.is_empty());
}

#[test]
fn test_store_grows_past_one_batch() {
    let input: String = (0..1000)
        .map(|i| {
            if i % 2 == 0 {
                format!("LD R0, X ; R {:02X} {:04X}\n", i % 256, i)
            } else {
                "NOP\n".to_string()
            }
        })
        .collect();
    let parsed = parse_trace(input.as_bytes(), &ParseOptions::default()).unwrap();

    assert_eq!(parsed.records.len(), 1000);
    assert_eq!(parsed.records[998].address(), Some("03E6"));
    let lines: Vec<usize> = parsed.records.iter().map(|r| r.line).collect();
    assert_eq!(lines, (1..=1000).collect::<Vec<_>>());
}

#[test]
fn test_malformed_lines_keep_their_cycle() {
    let input = "LD R0 ; R 3F\nLD R1 ; W GG 0100\nLD R2 ; R 40 0101\n";
    let parsed = parse_trace(input.as_bytes(), &ParseOptions::default()).unwrap();

    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.malformed.len(), 2);
    assert_eq!(parsed.malformed[0].line, 1);
    assert_eq!(parsed.malformed[1].line, 2);
    assert_eq!(parsed.records[0].direction(), Direction::Neither);
    assert_eq!(parsed.records[2].direction(), Direction::Read);
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let input = b"MOV \xff\xfe ; R 3F 00A4\n";
    let parsed = parse_trace(&input[..], &ParseOptions::default()).unwrap();

    assert_eq!(parsed.records[0].data(), Some("3F"));
}
