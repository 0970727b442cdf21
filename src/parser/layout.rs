//! Field positions for the track text format
//!
//! Every tracker script used the same positions, so the defaults describe
//! the StitchNodes layout. A layout can be overridden for trackers that add
//! or reorder columns.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_DATA_FIELDS, TRACK_START_MARKER, data_fields, header_fields};
use crate::error::{Result, TrackError};

/// Token positions for header and data lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// First token of a header line
    pub start_marker: String,

    pub header_point_count: usize,
    pub header_year: usize,
    pub header_month: usize,
    pub header_day: usize,
    pub header_hour: usize,

    /// Lines with fewer tokens are skipped as short lines
    pub min_data_fields: usize,

    pub grid_i: usize,
    pub grid_j: usize,
    pub longitude: usize,
    pub latitude: usize,
    pub pressure: usize,
    pub wind_speed: usize,
    pub valid_year: usize,
    pub valid_month: usize,
    pub valid_day: usize,
    pub valid_hour: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            start_marker: TRACK_START_MARKER.to_string(),
            header_point_count: header_fields::POINT_COUNT,
            header_year: header_fields::YEAR,
            header_month: header_fields::MONTH,
            header_day: header_fields::DAY,
            header_hour: header_fields::HOUR,
            min_data_fields: MIN_DATA_FIELDS,
            grid_i: data_fields::GRID_I,
            grid_j: data_fields::GRID_J,
            longitude: data_fields::LONGITUDE,
            latitude: data_fields::LATITUDE,
            pressure: data_fields::PRESSURE,
            wind_speed: data_fields::WIND_SPEED,
            valid_year: data_fields::YEAR,
            valid_month: data_fields::MONTH,
            valid_day: data_fields::DAY,
            valid_hour: data_fields::HOUR,
        }
    }
}

impl FieldLayout {
    /// Number of tokens a header line must carry
    pub fn header_field_count(&self) -> usize {
        [
            self.header_point_count,
            self.header_year,
            self.header_month,
            self.header_day,
            self.header_hour,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }

    fn data_positions(&self) -> [usize; 10] {
        [
            self.grid_i,
            self.grid_j,
            self.longitude,
            self.latitude,
            self.pressure,
            self.wind_speed,
            self.valid_year,
            self.valid_month,
            self.valid_day,
            self.valid_hour,
        ]
    }

    /// Reject layouts that would index past the tokens a valid line carries
    pub fn validate(&self) -> Result<()> {
        if self.start_marker.is_empty() || self.start_marker.contains(char::is_whitespace) {
            return Err(TrackError::configuration(format!(
                "start marker must be a single non-empty token, got '{}'",
                self.start_marker
            )));
        }

        // Position 0 is the marker itself
        let header_positions = [
            self.header_point_count,
            self.header_year,
            self.header_month,
            self.header_day,
            self.header_hour,
        ];
        if header_positions.contains(&0) {
            return Err(TrackError::configuration(
                "header field positions must not overlap the start marker",
            ));
        }

        if let Some(position) = self
            .data_positions()
            .into_iter()
            .find(|&position| position >= self.min_data_fields)
        {
            return Err(TrackError::configuration(format!(
                "data field position {} is outside the minimum of {} fields",
                position, self.min_data_fields
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = FieldLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.header_field_count(), 6);
        assert_eq!(layout.min_data_fields, 11);
    }

    #[test]
    fn test_position_beyond_minimum_rejected() {
        let layout = FieldLayout {
            valid_hour: 11,
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_header_position_zero_rejected() {
        let layout = FieldLayout {
            header_year: 0,
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_marker_with_whitespace_rejected() {
        let layout = FieldLayout {
            start_marker: "track start".to_string(),
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }
}
