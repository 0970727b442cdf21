//! Storm Track Processor Library
//!
//! Converts the fixed-layout text output of cyclone tracking runs (ERA5,
//! MERRA2 and NeuralGCM forecasts) into one row per track point, written as
//! CSV or Parquet.
//!
//! This library provides tools for:
//! - Scanning `start` blocks and their data lines into typed track points
//! - Computing lead time from each block's forecast origin
//! - Longitude normalization, range filtering and Saffir-Simpson categories
//! - Writing profile-specific column layouts with polars
//! - Converting directories of track files concurrently
//!
//! ```
//! use storm_track_processor::StormTrackParser;
//!
//! let text = "start 1 2020 7 1 0\n10 20 300.0 15.0 1000.0 20.0 0.0 2020 7 1 6\n";
//! let result = StormTrackParser::default().parse_str(text).unwrap();
//! assert_eq!(result.dataset.len(), 1);
//! assert_eq!(result.dataset.points()[0].lead_time_hours, 6);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use config::{OutputFormat, ProcessorConfig};
pub use error::{Result, TrackError};
pub use models::{DatasetProfile, ParsedDataset, TrackPoint};
pub use parser::StormTrackParser;
pub use processor::TrackProcessor;
