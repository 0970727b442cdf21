//! Test fixtures for track parser testing
//!
//! Shared sample blocks and helpers used by the parser test modules.

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Write;
use tempfile::NamedTempFile;

mod scanner_tests;
mod stats_tests;

/// Two-point block from a MERRA2 1980 run
pub const SAMPLE_BLOCK: &str = "start 2 1980 1 10 0
1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6
2 1 281.0 15.5 985.0 60.0 0.0 1980 1 10 12
";

/// Build a well-formed data line
pub fn data_line(lon: f64, lat: f64, wind: f64, year: i32, month: u32, day: u32, hour: u32) -> String {
    format!(
        "\t412\t288\t{lon:.6}\t{lat:.6}\t1.000870e+05\t{wind:.6}\t0.000000e+00\t{year}\t{month}\t{day}\t{hour}"
    )
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Write content to a temporary track file
pub fn write_track_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
