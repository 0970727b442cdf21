//! Validation of individual header and data lines
//!
//! Each function returns the parsed value or a [`LineSkip`] describing why
//! the line contributes nothing. Skips are expected in tracker output and
//! never abort a parse.

use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;
use thiserror::Error;

use super::layout::FieldLayout;
use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::models::{TrackHeader, TrackPoint};

/// Reason a line produced no header or track point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineSkip {
    #[error("not a block header")]
    NotHeader,

    #[error("header has {found} fields, expected at least {required}")]
    ShortHeader { found: usize, required: usize },

    #[error("line has {found} fields, expected at least {required}")]
    ShortLine { found: usize, required: usize },

    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid calendar date {year:04}-{month:02}-{day:02} {hour:02}h")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },
}

/// Parse a `start <count> <year> <month> <day> <hour> ...` header line
pub fn parse_header_line(line: &str, layout: &FieldLayout) -> Result<TrackHeader, LineSkip> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.first() != Some(&layout.start_marker.as_str()) {
        return Err(LineSkip::NotHeader);
    }

    let required = layout.header_field_count();
    if tokens.len() < required {
        return Err(LineSkip::ShortHeader {
            found: tokens.len(),
            required,
        });
    }

    let point_count: i64 = parse_field(&tokens, layout.header_point_count, "point count")?;
    let origin_time = build_datetime(
        parse_field(&tokens, layout.header_year, "origin year")?,
        parse_field(&tokens, layout.header_month, "origin month")?,
        parse_field(&tokens, layout.header_day, "origin day")?,
        parse_field(&tokens, layout.header_hour, "origin hour")?,
    )?;

    Ok(TrackHeader {
        // A negative count announces an empty block
        point_count: usize::try_from(point_count).unwrap_or(0),
        origin_time,
    })
}

/// Parse one data line belonging to the block opened by `header`
pub fn parse_data_line(
    line: &str,
    layout: &FieldLayout,
    header: &TrackHeader,
    storm_id: u32,
) -> Result<TrackPoint, LineSkip> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < layout.min_data_fields {
        return Err(LineSkip::ShortLine {
            found: tokens.len(),
            required: layout.min_data_fields,
        });
    }

    let grid_i = parse_field(&tokens, layout.grid_i, "grid i")?;
    let grid_j = parse_field(&tokens, layout.grid_j, "grid j")?;
    let longitude = parse_field(&tokens, layout.longitude, "longitude")?;
    let latitude = parse_field(&tokens, layout.latitude, "latitude")?;
    let central_pressure = parse_field(&tokens, layout.pressure, "pressure")?;
    let wind_speed = parse_field(&tokens, layout.wind_speed, "wind speed")?;
    let valid_time = build_datetime(
        parse_field(&tokens, layout.valid_year, "valid year")?,
        parse_field(&tokens, layout.valid_month, "valid month")?,
        parse_field(&tokens, layout.valid_day, "valid day")?,
        parse_field(&tokens, layout.valid_hour, "valid hour")?,
    )?;

    Ok(TrackPoint {
        storm_id,
        grid_i,
        grid_j,
        valid_time,
        longitude,
        latitude,
        central_pressure,
        wind_speed,
        origin_time: header.origin_time,
        lead_time_hours: lead_time_hours(valid_time, header.origin_time),
    })
}

/// Whole hours between two timestamps, truncated toward zero
pub fn lead_time_hours(valid_time: NaiveDateTime, origin_time: NaiveDateTime) -> i64 {
    (valid_time - origin_time).num_hours()
}

fn parse_field<T: FromStr>(
    tokens: &[&str],
    index: usize,
    field: &'static str,
) -> Result<T, LineSkip> {
    let value = tokens.get(index).copied().unwrap_or_default();
    value.parse::<T>().map_err(|_| LineSkip::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn build_datetime(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDateTime, LineSkip> {
    let invalid = LineSkip::InvalidDate {
        year,
        month,
        day,
        hour,
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid);
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_lead_time_truncates_toward_zero() {
        let origin = datetime(1980, 1, 10, 0);
        assert_eq!(lead_time_hours(datetime(1980, 1, 10, 6), origin), 6);
        assert_eq!(lead_time_hours(datetime(1980, 1, 9, 18), origin), -6);
        let half_hour = origin + chrono::Duration::minutes(90);
        assert_eq!(lead_time_hours(half_hour, origin), 1);
        assert_eq!(lead_time_hours(origin - chrono::Duration::minutes(90), origin), -1);
    }

    #[test]
    fn test_build_datetime_rejects_impossible_dates() {
        assert!(build_datetime(1981, 2, 29, 0).is_err());
        assert!(build_datetime(1980, 2, 29, 0).is_ok());
        assert!(build_datetime(1980, 1, 10, 24).is_err());
        assert!(build_datetime(0, 1, 10, 0).is_err());
        assert!(build_datetime(10000, 1, 1, 0).is_err());
    }

    #[test]
    fn test_missing_token_is_invalid_number() {
        let tokens = ["start", "2"];
        let result: Result<i32, _> = parse_field(&tokens, 5, "origin hour");
        assert_eq!(
            result,
            Err(LineSkip::InvalidNumber {
                field: "origin hour",
                value: String::new()
            })
        );
    }
}
