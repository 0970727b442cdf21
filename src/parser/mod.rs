//! Storm-track text parser
//!
//! Reads the forecast-block text format written by the TempestExtremes
//! StitchNodes tracker: a `start` header announcing a point count and an
//! origin time, followed by that many whitespace-separated data lines.
//!
//! ## Architecture
//!
//! - [`layout`] - Field positions for header and data lines
//! - [`line_parser`] - Validation of a single header or data line
//! - [`columns`] - Columnar accumulation and the final consistency check
//! - [`scanner`] - The forward scan over a file
//! - [`stats`] - Parse counters and skip diagnostics
//!
//! ## Usage
//!
//! ```rust
//! use storm_track_processor::parser::StormTrackParser;
//!
//! let text = "start 1 1980 1 10 0\n1 1 280.5 15.2 990.0 55.0 0.0 1980 1 10 6\n";
//! let result = StormTrackParser::default().parse_str(text).unwrap();
//! assert_eq!(result.dataset.len(), 1);
//! assert_eq!(result.dataset.points()[0].lead_time_hours, 6);
//! ```

pub mod columns;
pub mod layout;
pub mod line_parser;
pub mod scanner;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use columns::TrackColumns;
pub use layout::FieldLayout;
pub use line_parser::LineSkip;
pub use scanner::StormTrackParser;
pub use stats::{ParseResult, ParseStats};
