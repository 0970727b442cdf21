//! Core data structures for storm-track conversion.
//!
//! Defines the parsed track records, the per-file dataset handed to the
//! writer, column profiles for the supported model outputs, and processing
//! statistics.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Header line of one forecast block. Only lives while its block is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackHeader {
    /// Number of raw lines that belong to the block
    pub point_count: usize,
    pub origin_time: NaiveDateTime,
}

/// One position along a storm track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// 1-based ordinal of the enclosing forecast block within its file
    pub storm_id: u32,
    pub grid_i: i32,
    pub grid_j: i32,
    pub valid_time: NaiveDateTime,
    /// Degrees east as written by the tracker, may exceed 180
    pub longitude: f64,
    pub latitude: f64,
    pub central_pressure: f64,
    pub wind_speed: f64,
    pub origin_time: NaiveDateTime,
    /// Whole hours from `origin_time` to `valid_time`, truncated toward zero
    pub lead_time_hours: i64,
}

/// All track points parsed from one input file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDataset {
    points: Vec<TrackPoint>,
}

/// Contiguous run of points belonging to one forecast block
#[derive(Debug, Clone, Copy)]
pub struct Track<'a> {
    pub storm_id: u32,
    pub origin_time: NaiveDateTime,
    pub points: &'a [TrackPoint],
}

impl ParsedDataset {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TrackPoint> {
        self.points
    }

    /// Group points into tracks. Boundaries are implied by changes of
    /// `storm_id` between neighbouring rows.
    pub fn tracks(&self) -> impl Iterator<Item = Track<'_>> {
        self.points
            .chunk_by(|a, b| a.storm_id == b.storm_id)
            .map(|points| Track {
                storm_id: points[0].storm_id,
                origin_time: points[0].origin_time,
                points,
            })
    }

    /// Number of tracks with at least one point
    pub fn track_count(&self) -> usize {
        self.tracks().count()
    }
}

impl Track<'_> {
    /// Peak wind speed along the track, ignoring NaN readings
    pub fn max_wind_speed(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.wind_speed)
            .filter(|w| !w.is_nan())
            .reduce(f64::max)
    }

    /// Lowest central pressure along the track, ignoring NaN readings
    pub fn min_pressure(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.central_pressure)
            .filter(|p| !p.is_nan())
            .reduce(f64::min)
    }
}

/// Column naming conventions used by the different model pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatasetProfile {
    /// Descriptive column names
    #[default]
    Standard,
    /// ERA5 reanalysis tracks
    Era5,
    /// MERRA2 reanalysis tracks
    Merra2,
    /// NeuralGCM simulation tracks
    #[value(name = "neuralgcm")]
    #[serde(rename = "neuralgcm")]
    NeuralGcm,
    /// NeuralGCM tracks labelled with storm ids
    Labeled,
}

/// Logical output columns. Each profile maps a subset of these onto names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StormId,
    ValidTime,
    Latitude,
    Longitude,
    WindSpeed,
    CentralPressure,
    OriginTime,
    LeadTimeHours,
    Category,
}

impl DatasetProfile {
    /// Ordered (column, name) pairs written for this profile
    pub fn columns(&self) -> &'static [(Column, &'static str)] {
        use Column::*;
        match self {
            DatasetProfile::Standard => &[
                (ValidTime, "valid_time"),
                (Latitude, "latitude"),
                (Longitude, "longitude"),
                (WindSpeed, "wind_speed"),
                (CentralPressure, "central_pressure"),
                (OriginTime, "origin_time"),
                (LeadTimeHours, "lead_time_hours"),
            ],
            DatasetProfile::Era5 => &[
                (ValidTime, "dates"),
                (Latitude, "lats"),
                (Longitude, "lons"),
                (CentralPressure, "pressure"),
                (WindSpeed, "wind_speed"),
                (OriginTime, "fcst_ini_date"),
                (LeadTimeHours, "lead_time_hours"),
            ],
            DatasetProfile::Merra2 => &[
                (ValidTime, "dates"),
                (Latitude, "lats"),
                (Longitude, "lons"),
                (WindSpeed, "vs"),
                (CentralPressure, "pa"),
                (OriginTime, "fcst_ini_date"),
                (LeadTimeHours, "lead_time_hours"),
            ],
            DatasetProfile::NeuralGcm => &[
                (ValidTime, "dates"),
                (Latitude, "lats"),
                (Longitude, "lons"),
                (WindSpeed, "wind_speed"),
                (CentralPressure, "pa"),
                (OriginTime, "fcst_ini_date"),
                (LeadTimeHours, "lead_time_hours"),
            ],
            DatasetProfile::Labeled => &[
                (StormId, "storm_id"),
                (ValidTime, "dates"),
                (Latitude, "lats"),
                (Longitude, "lons"),
                (WindSpeed, "wind_speed"),
                (CentralPressure, "pa"),
                (OriginTime, "storm_start_time"),
                (LeadTimeHours, "time_since_start_hours"),
            ],
        }
    }

    /// Whether the profile normalizes longitudes and drops out-of-range rows
    pub fn cleans_coordinates(&self) -> bool {
        matches!(self, DatasetProfile::Era5)
    }
}

/// Outcome of converting one input file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub tracks: usize,
    pub lines_skipped: usize,
}

/// Processing statistics for a whole run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub total_tracks: usize,
    pub lines_skipped: usize,
    pub output_paths: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        self.total_rows += outcome.rows_written;
        self.total_tracks += outcome.tracks;
        self.lines_skipped += outcome.lines_skipped;
        self.output_paths.push(outcome.output_path.clone());
    }

    pub fn is_success(&self) -> bool {
        self.files_failed == 0
    }
}
