//! Format constants for storm-track text files and converted outputs.
//!
//! The default field positions describe the StitchNodes text layout written
//! by TempestExtremes for ERA5, MERRA2 and NeuralGCM runs.

// =============================================================================
// Track File Format
// =============================================================================

/// First token of every forecast block header line
pub const TRACK_START_MARKER: &str = "start";

/// Minimum number of tokens on a data line
pub const MIN_DATA_FIELDS: usize = 11;

/// Header token positions
pub mod header_fields {
    pub const POINT_COUNT: usize = 1;
    pub const YEAR: usize = 2;
    pub const MONTH: usize = 3;
    pub const DAY: usize = 4;
    pub const HOUR: usize = 5;
}

/// Data line token positions. Column 6 is present in the format but unused.
pub mod data_fields {
    pub const GRID_I: usize = 0;
    pub const GRID_J: usize = 1;
    pub const LONGITUDE: usize = 2;
    pub const LATITUDE: usize = 3;
    pub const PRESSURE: usize = 4;
    pub const WIND_SPEED: usize = 5;
    pub const YEAR: usize = 7;
    pub const MONTH: usize = 8;
    pub const DAY: usize = 9;
    pub const HOUR: usize = 10;
}

/// Calendar years accepted for origin and valid timestamps
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

// =============================================================================
// Output
// =============================================================================

/// Timestamp serialization used in every output column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix appended to each converted file stem
pub const OUTPUT_SUFFIX: &str = "_processed";

/// Suffix of the optional per-track summary table
pub const SUMMARY_SUFFIX: &str = "_summary";

/// Default glob used when the input is a directory
pub const DEFAULT_FILE_PATTERN: &str = "*.dat";

/// Number of skip messages retained in parse statistics
pub const MAX_RECORDED_SKIPS: usize = 50;

// =============================================================================
// Coordinates
// =============================================================================

pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LATITUDE: f64 = -90.0;

// =============================================================================
// Saffir-Simpson Scale
// =============================================================================

/// Upper wind-speed bounds (m/s, inclusive) for each category below Category 5
pub mod saffir_simpson {
    pub const TROPICAL_DEPRESSION_MAX: f64 = 17.0;
    pub const TROPICAL_STORM_MAX: f64 = 32.0;
    pub const CATEGORY_1_MAX: f64 = 42.0;
    pub const CATEGORY_2_MAX: f64 = 49.0;
    pub const CATEGORY_3_MAX: f64 = 58.0;
    pub const CATEGORY_4_MAX: f64 = 70.0;
}
