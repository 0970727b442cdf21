//! Configuration management and validation.
//!
//! Every entry point receives a [`ProcessorConfig`]; nothing is read from
//! process-wide state. Defaults depend on the dataset profile.

use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FILE_PATTERN, OUTPUT_SUFFIX, SUMMARY_SUFFIX};
use crate::error::{Result, TrackError};
use crate::models::DatasetProfile;
use crate::parser::FieldLayout;
use crate::transform::CoordinateCleaning;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    #[value(name = "none")]
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Settings for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// A track file or a directory of track files
    pub input_path: PathBuf,

    /// Output file (single input) or directory (directory input)
    pub output_path: Option<PathBuf>,

    /// Glob applied inside an input directory
    pub file_pattern: String,

    /// Column naming convention
    pub profile: DatasetProfile,

    pub output_format: OutputFormat,

    /// Parquet compression, ignored for CSV
    pub compression: CompressionAlgorithm,

    /// Longitude normalization and range filtering
    pub cleaning: CoordinateCleaning,

    /// Prepend a storm_id column when the profile lacks one
    pub include_storm_id: bool,

    /// Append a Saffir-Simpson category column
    pub include_category: bool,

    /// Also write a per-track intensity table next to each output
    pub write_summary: bool,

    /// Maximum files converted at once
    pub max_concurrent_files: usize,

    /// Token positions of the track format
    pub layout: FieldLayout,
}

impl ProcessorConfig {
    /// Configuration with profile defaults for the given input
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            profile: DatasetProfile::default(),
            output_format: OutputFormat::default(),
            compression: CompressionAlgorithm::default(),
            cleaning: CoordinateCleaning::default(),
            include_storm_id: false,
            include_category: false,
            write_summary: false,
            max_concurrent_files: num_cpus::get().max(1),
            layout: FieldLayout::default(),
        }
    }

    /// Set the output file or directory
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    /// Set the glob used for directory inputs
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Select a profile and adopt its coordinate cleaning defaults
    pub fn with_profile(mut self, profile: DatasetProfile) -> Self {
        self.profile = profile;
        let cleans = profile.cleans_coordinates();
        self.cleaning = CoordinateCleaning {
            normalize_longitude: cleans,
            drop_out_of_range: cleans,
        };
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_cleaning(mut self, cleaning: CoordinateCleaning) -> Self {
        self.cleaning = cleaning;
        self
    }

    pub fn with_storm_id(mut self) -> Self {
        self.include_storm_id = true;
        self
    }

    pub fn with_category(mut self) -> Self {
        self.include_category = true;
        self
    }

    pub fn with_summary(mut self) -> Self {
        self.write_summary = true;
        self
    }

    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Check settings that would otherwise fail mid-run
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_files == 0 {
            return Err(TrackError::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }
        if self.file_pattern.trim().is_empty() {
            return Err(TrackError::configuration("file pattern must not be empty"));
        }
        if self.file_pattern.contains('/') || self.file_pattern.contains('\\') {
            return Err(TrackError::configuration(format!(
                "file pattern '{}' must match file names, not paths",
                self.file_pattern
            )));
        }
        self.layout.validate()
    }

    /// Output path for one input file.
    ///
    /// Spaces in the file stem become underscores and `_processed` plus the
    /// format extension is appended.
    pub fn output_file_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        output_dir.join(self.derived_file_name(input_file, OUTPUT_SUFFIX))
    }

    /// Summary table path for one input file, named like the output with
    /// `_summary` in place of `_processed`
    pub fn summary_file_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        output_dir.join(self.derived_file_name(input_file, SUMMARY_SUFFIX))
    }

    fn derived_file_name(&self, input_file: &Path, suffix: &str) -> String {
        let stem = input_file
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .replace(' ', "_");
        format!("{}{}.{}", stem, suffix, self.output_format.extension())
    }
}
