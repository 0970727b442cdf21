//! Tests for the forward scan over whole track files

use super::*;
use crate::error::TrackError;
use crate::parser::{FieldLayout, StormTrackParser};

fn parse(content: &str) -> crate::parser::ParseResult {
    StormTrackParser::default().parse_str(content).unwrap()
}

#[test]
fn test_two_point_block() {
    let result = parse(SAMPLE_BLOCK);
    let points = result.dataset.points();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].origin_time, datetime(1980, 1, 10, 0));
    assert_eq!(points[0].longitude, 280.5);
    assert_eq!(points[0].latitude, 15.2);
    assert_eq!(points[0].central_pressure, 990.0);
    assert_eq!(points[0].wind_speed, 55.0);
    assert_eq!(points[0].valid_time, datetime(1980, 1, 10, 6));
    assert_eq!(points[0].lead_time_hours, 6);
    assert_eq!(points[1].lead_time_hours, 12);
    assert_eq!(points[1].origin_time, points[0].origin_time);

    assert_eq!(result.stats.headers_parsed, 1);
    assert_eq!(result.stats.data_lines, 2);
    assert_eq!(result.stats.points_parsed, 2);
    assert_eq!(result.stats.total_lines, 3);
}

#[test]
fn test_well_formed_block_yields_every_line() {
    let mut content = String::from("start 5 2022 8 27 18\n");
    for step in 0..5 {
        let valid = datetime(2022, 8, 27, 18) + chrono::Duration::hours(6 * step);
        content.push_str(&data_line(
            300.0 - step as f64,
            20.0,
            25.0,
            chrono::Datelike::year(&valid),
            chrono::Datelike::month(&valid),
            chrono::Datelike::day(&valid),
            chrono::Timelike::hour(&valid),
        ));
        content.push('\n');
    }

    let result = parse(&content);
    let points = result.dataset.points();
    assert_eq!(points.len(), 5);
    for point in points {
        assert_eq!(point.origin_time, datetime(2022, 8, 27, 18));
        assert_eq!(
            point.lead_time_hours,
            (point.valid_time - point.origin_time).num_hours()
        );
    }
    assert_eq!(points[4].lead_time_hours, 24);
    assert_eq!(points[4].valid_time, datetime(2022, 8, 28, 18));
}

#[test]
fn test_short_line_consumes_a_slot() {
    let content = "start 3 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
1 1 281.0 15.5 985.0 60.0 0.0 1980
1 1 281.5 15.8 980.0 62.0 0.0 1980 1 10 18
";
    let result = parse(content);
    let leads: Vec<_> = result
        .dataset
        .points()
        .iter()
        .map(|p| p.lead_time_hours)
        .collect();

    assert_eq!(leads, vec![6, 18]);
    assert_eq!(result.stats.short_lines, 1);
    assert_eq!(result.stats.data_lines, 3);
}

#[test]
fn test_block_budget_counts_raw_lines() {
    // The short line uses one of the two slots, so the final line falls
    // outside the block and is ignored as a non-header line.
    let content = "start 2 1980 1 10 0
short line
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
1 1 281.0 15.5 985.0 60.0 0.0 1980 1 10 12
";
    let result = parse(content);

    assert_eq!(result.dataset.len(), 1);
    assert_eq!(result.dataset.points()[0].lead_time_hours, 6);
    assert_eq!(result.stats.data_lines, 2);
}

#[test]
fn test_malformed_line_dropped_without_aborting_block() {
    let content = "start 3 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
1 1 281.0 north 985.0 60.0 0.0 1980 1 10 12
1 1 281.5 15.8 980.0 62.0 0.0 1980 2 30 18
start 1 1980 1 11 0
1 1 282.0 16.0 975.0 65.0 0.0 1980 1 11 6
";
    let result = parse(content);

    assert_eq!(result.dataset.len(), 2);
    assert_eq!(result.stats.malformed_lines, 2);
    assert_eq!(result.dataset.points()[1].storm_id, 2);
    assert_eq!(result.dataset.points()[1].origin_time, datetime(1980, 1, 11, 0));
}

#[test]
fn test_truncated_block_is_not_an_error() {
    let content = "start 5 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
1 1 281.0 15.5 985.0 60.0 0.0 1980 1 10 12";
    let result = parse(content);

    assert_eq!(result.dataset.len(), 2);
    assert_eq!(result.stats.truncated_blocks, 1);
}

#[test]
fn test_rejected_header_skips_one_line_only() {
    let content = "start x 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
start 1 1980 1 11 0
1 1 282.0 16.0 975.0 65.0 0.0 1980 1 11 6
";
    let result = parse(content);

    assert_eq!(result.stats.headers_rejected, 1);
    assert_eq!(result.stats.headers_parsed, 1);
    assert_eq!(result.dataset.len(), 1);
    assert_eq!(result.dataset.points()[0].storm_id, 1);
    assert_eq!(result.dataset.points()[0].lead_time_hours, 6);
}

#[test]
fn test_header_inside_block_is_consumed_as_data() {
    let content = "start 2 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
start 1 1980 1 11 0
1 1 282.0 16.0 975.0 65.0 0.0 1980 1 11 6
";
    let result = parse(content);

    assert_eq!(result.stats.headers_parsed, 1);
    assert_eq!(result.stats.short_lines, 1);
    assert_eq!(result.dataset.len(), 1);
}

#[test]
fn test_storm_ids_count_empty_blocks() {
    let content = "start 1 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
start 0 1980 1 11 0
start 1 1980 1 12 0
1 1 282.0 16.0 975.0 65.0 0.0 1980 1 12 6
";
    let result = parse(content);
    let ids: Vec<_> = result.dataset.points().iter().map(|p| p.storm_id).collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(result.stats.headers_parsed, 3);
    assert_eq!(result.dataset.track_count(), 2);
}

#[test]
fn test_noise_between_blocks_is_ignored() {
    let content = format!(
        "# tracker output\n\n{}\nsome trailing note\n\n{}",
        SAMPLE_BLOCK.trim_end(),
        SAMPLE_BLOCK
    );
    let result = parse(&content);

    assert_eq!(result.dataset.len(), 4);
    assert_eq!(result.dataset.track_count(), 2);
    assert_eq!(result.stats.lines_skipped(), 0);
}

#[test]
fn test_records_never_exceed_data_lines() {
    let content = "start 4 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6

1 1 abc 15.2 990.0 55.0 0.0 1980 1 10 6
start 2 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
";
    let result = parse(content);

    assert!(result.dataset.len() <= result.stats.data_lines);
    assert_eq!(
        result.dataset.len() + result.stats.lines_skipped(),
        result.stats.data_lines
    );
}

#[test]
fn test_parse_is_idempotent_and_order_preserving() {
    let content = "start 3 1980 1 10 0
1 1 283.0 15.2 990.0 55.0 0.0 1980 1 10 18
1 1 281.0 15.5 985.0 60.0 0.0 1980 1 10 6
1 1 282.0 15.8 980.0 62.0 0.0 1980 1 10 12
";
    let parser = StormTrackParser::default();
    let first = parser.parse_str(content).unwrap();
    let second = parser.parse_str(content).unwrap();

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.stats, second.stats);

    let lons: Vec<_> = first.dataset.points().iter().map(|p| p.longitude).collect();
    assert_eq!(lons, vec![283.0, 281.0, 282.0]);
}

#[test]
fn test_crlf_line_endings() {
    let content = SAMPLE_BLOCK.replace('\n', "\r\n");
    assert_eq!(parse(&content).dataset.len(), 2);
}

#[test]
fn test_parse_lines_accepts_owned_strings() {
    let lines: Vec<String> = SAMPLE_BLOCK.lines().map(str::to_string).collect();
    let result = StormTrackParser::default().parse_lines(&lines).unwrap();
    assert_eq!(result.dataset.len(), 2);
}

#[test]
fn test_custom_layout() {
    let layout = FieldLayout {
        start_marker: "track".to_string(),
        ..Default::default()
    };
    let parser = StormTrackParser::new(layout).unwrap();

    let result = parser
        .parse_str(&SAMPLE_BLOCK.replace("start", "track"))
        .unwrap();
    assert_eq!(result.dataset.len(), 2);

    let result = parser.parse_str(SAMPLE_BLOCK).unwrap();
    assert!(result.dataset.is_empty());
}

#[test]
fn test_invalid_layout_rejected() {
    let layout = FieldLayout {
        min_data_fields: 5,
        ..Default::default()
    };
    assert!(matches!(
        StormTrackParser::new(layout),
        Err(TrackError::Configuration { .. })
    ));
}

#[test]
fn test_parse_file() {
    let file = write_track_file(SAMPLE_BLOCK);
    let result = StormTrackParser::default().parse_file(file.path()).unwrap();
    assert_eq!(result.dataset.len(), 2);
}

#[test]
fn test_parse_missing_file() {
    let result = StormTrackParser::default()
        .parse_file(std::path::Path::new("/nonexistent/tracks.dat"));
    assert!(matches!(result, Err(TrackError::Io(_))));
}

#[test]
fn test_empty_input() {
    let result = parse("");
    assert!(result.dataset.is_empty());
    assert_eq!(result.stats, crate::parser::ParseStats::default());
}
