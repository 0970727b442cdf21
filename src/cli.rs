//! Command-line interface components.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::config::{CompressionAlgorithm, OutputFormat, ProcessorConfig};
use crate::constants::DEFAULT_FILE_PATTERN;
use crate::models::DatasetProfile;
use crate::parser::FieldLayout;
use crate::transform::CoordinateCleaning;

#[derive(Parser, Debug)]
#[command(name = "storm-tracks")]
#[command(about = "Convert storm-track text output (ERA5, MERRA2, NeuralGCM) to CSV or Parquet tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Track file, or directory of track files
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output file (file input) or directory (directory input)
    #[arg(short, long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// File name pattern used when INPUT is a directory
    #[arg(short, long, default_value = DEFAULT_FILE_PATTERN)]
    pub pattern: String,

    /// Column naming convention of the output table
    #[arg(long, value_enum, default_value_t = DatasetProfile::Standard)]
    pub profile: DatasetProfile,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Parquet compression algorithm
    #[arg(long, value_enum, default_value_t = CompressionAlgorithm::Snappy)]
    pub compression: CompressionAlgorithm,

    /// Map longitudes above 180 into [-180, 180]
    #[arg(long)]
    pub normalize_longitude: bool,

    /// Drop points outside longitude [-180, 180] or latitude [-90, 90]
    #[arg(long)]
    pub drop_out_of_range: bool,

    /// Add a storm_id column numbering tracks from 1 in each file
    #[arg(long)]
    pub storm_id: bool,

    /// Add a Saffir-Simpson category column derived from wind speed
    #[arg(long)]
    pub category: bool,

    /// Also write <name>_summary with max wind and min pressure per track
    #[arg(long)]
    pub summary: bool,

    /// First token of block header lines
    #[arg(long, value_name = "TOKEN")]
    pub start_marker: Option<String>,

    /// Number of files converted concurrently (defaults to CPU count)
    #[arg(short, long, value_name = "COUNT")]
    pub jobs: Option<usize>,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Build the processor configuration. Flags can only switch coordinate
    /// cleaning on, never off, relative to the profile defaults.
    pub fn to_config(&self) -> ProcessorConfig {
        let mut config = ProcessorConfig::new(&self.input_path)
            .with_file_pattern(&self.pattern)
            .with_profile(self.profile)
            .with_output_format(self.format)
            .with_compression(self.compression);

        let cleaning = CoordinateCleaning {
            normalize_longitude: config.cleaning.normalize_longitude || self.normalize_longitude,
            drop_out_of_range: config.cleaning.drop_out_of_range || self.drop_out_of_range,
        };
        config = config.with_cleaning(cleaning);

        if let Some(output_path) = &self.output_path {
            config = config.with_output_path(output_path);
        }
        if self.storm_id {
            config = config.with_storm_id();
        }
        if self.category {
            config = config.with_category();
        }
        if self.summary {
            config = config.with_summary();
        }
        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_files(jobs);
        }
        if let Some(marker) = &self.start_marker {
            config = config.with_layout(FieldLayout {
                start_marker: marker.clone(),
                ..FieldLayout::default()
            });
        }

        config
    }

    /// Maximum log level for the subscriber
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
