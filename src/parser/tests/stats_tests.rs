//! Tests for parse statistics

use crate::constants::MAX_RECORDED_SKIPS;
use crate::parser::{LineSkip, ParseStats};

#[test]
fn test_skip_categories() {
    let mut stats = ParseStats::new();
    stats.record_data_skip(
        4,
        &LineSkip::ShortLine {
            found: 8,
            required: 11,
        },
    );
    stats.record_data_skip(
        5,
        &LineSkip::InvalidNumber {
            field: "latitude",
            value: "north".to_string(),
        },
    );
    stats.record_header_skip(9, &LineSkip::ShortHeader { found: 3, required: 6 });

    assert_eq!(stats.short_lines, 1);
    assert_eq!(stats.malformed_lines, 1);
    assert_eq!(stats.headers_rejected, 1);
    assert_eq!(stats.lines_skipped(), 2);
    assert_eq!(
        stats.skipped[0],
        "line 5: line has 8 fields, expected at least 11"
    );
    assert_eq!(stats.skipped[1], "line 6: invalid latitude value 'north'");
}

#[test]
fn test_skip_messages_are_capped() {
    let mut stats = ParseStats::new();
    for index in 0..MAX_RECORDED_SKIPS + 10 {
        stats.record_data_skip(
            index,
            &LineSkip::ShortLine {
                found: 2,
                required: 11,
            },
        );
    }

    assert_eq!(stats.short_lines, MAX_RECORDED_SKIPS + 10);
    assert_eq!(stats.skipped.len(), MAX_RECORDED_SKIPS);
}

#[test]
fn test_yield_rate() {
    let mut stats = ParseStats::new();
    assert_eq!(stats.yield_rate(), 0.0);

    stats.data_lines = 4;
    stats.points_parsed = 3;
    assert_eq!(stats.yield_rate(), 75.0);
}
