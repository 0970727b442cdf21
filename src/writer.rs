//! Tabular output for parsed track datasets.
//!
//! Materializes a [`ParsedDataset`] as a polars `DataFrame` under the column
//! names of a [`DatasetProfile`] and writes it as CSV or Parquet. Timestamps
//! are written as `YYYY-MM-DD HH:MM:SS` strings in both formats.

use polars::prelude::{Column as FrameColumn, CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

use crate::config::{CompressionAlgorithm, OutputFormat, ProcessorConfig};
use crate::constants::TIMESTAMP_FORMAT;
use crate::error::{Result, TrackError};
use crate::models::{Column, DatasetProfile, ParsedDataset, TrackPoint};
use crate::transform::StormCategory;

const STORM_ID_COLUMN: &str = "storm_id";
const CATEGORY_COLUMN: &str = "category";

/// Writes datasets in one profile and format
#[derive(Debug, Clone)]
pub struct TrackWriter {
    profile: DatasetProfile,
    format: OutputFormat,
    compression: CompressionAlgorithm,
    include_storm_id: bool,
    include_category: bool,
}

impl TrackWriter {
    pub fn new(profile: DatasetProfile, format: OutputFormat) -> Self {
        Self {
            profile,
            format,
            compression: CompressionAlgorithm::default(),
            include_storm_id: false,
            include_category: false,
        }
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self {
            profile: config.profile,
            format: config.output_format,
            compression: config.compression,
            include_storm_id: config.include_storm_id,
            include_category: config.include_category,
        }
    }

    pub fn with_storm_id(mut self, include: bool) -> Self {
        self.include_storm_id = include;
        self
    }

    pub fn with_category(mut self, include: bool) -> Self {
        self.include_category = include;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Ordered output columns for this writer
    pub fn columns(&self) -> Vec<(Column, &'static str)> {
        let profile_columns = self.profile.columns();
        let mut columns = Vec::with_capacity(profile_columns.len() + 2);

        let has_storm_id = profile_columns
            .iter()
            .any(|(column, _)| *column == Column::StormId);
        if self.include_storm_id && !has_storm_id {
            columns.push((Column::StormId, STORM_ID_COLUMN));
        }
        columns.extend_from_slice(profile_columns);
        if self.include_category {
            columns.push((Column::Category, CATEGORY_COLUMN));
        }

        columns
    }

    /// Build the output frame, one row per track point in dataset order
    pub fn to_frame(&self, dataset: &ParsedDataset) -> Result<DataFrame> {
        let points = dataset.points();
        let columns = self
            .columns()
            .into_iter()
            .map(|(column, name)| build_column(column, name, points))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Per-track intensity table: one row per track with at least one point
    pub fn summary_frame(&self, dataset: &ParsedDataset) -> Result<DataFrame> {
        let tracks: Vec<_> = dataset.tracks().collect();

        let columns = vec![
            FrameColumn::new(
                STORM_ID_COLUMN.into(),
                tracks.iter().map(|t| t.storm_id).collect::<Vec<u32>>(),
            ),
            FrameColumn::new(
                "origin_time".into(),
                tracks
                    .iter()
                    .map(|t| t.origin_time.format(TIMESTAMP_FORMAT).to_string())
                    .collect::<Vec<String>>(),
            ),
            FrameColumn::new(
                "max_wind_speed".into(),
                tracks
                    .iter()
                    .map(|t| t.max_wind_speed())
                    .collect::<Vec<Option<f64>>>(),
            ),
            FrameColumn::new(
                "min_pressure".into(),
                tracks
                    .iter()
                    .map(|t| t.min_pressure())
                    .collect::<Vec<Option<f64>>>(),
            ),
        ];

        Ok(DataFrame::new(columns)?)
    }

    /// Write the dataset to `output_path`, creating parent directories.
    /// Returns the number of rows written.
    pub fn write(&self, dataset: &ParsedDataset, output_path: &Path) -> Result<usize> {
        let mut frame = self.to_frame(dataset)?;
        self.write_frame(&mut frame, output_path)
    }

    /// Write the per-track summary table. Returns the number of tracks written.
    pub fn write_summary(&self, dataset: &ParsedDataset, output_path: &Path) -> Result<usize> {
        let mut frame = self.summary_frame(dataset)?;
        self.write_frame(&mut frame, output_path)
    }

    fn write_frame(&self, frame: &mut DataFrame, output_path: &Path) -> Result<usize> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path)?;
        match self.format {
            OutputFormat::Csv => {
                let mut file = file;
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(frame)
                    .map_err(|e| {
                        TrackError::processing_failed(
                            output_path,
                            format!("Failed to write CSV: {}", e),
                        )
                    })?;
            }
            OutputFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(self.compression.to_polars_compression())
                    .finish(frame)
                    .map_err(|e| {
                        TrackError::processing_failed(
                            output_path,
                            format!("Failed to write parquet: {}", e),
                        )
                    })?;
            }
        }

        debug!(
            "Wrote {} rows to {}",
            frame.height(),
            output_path.display()
        );

        Ok(frame.height())
    }
}

fn build_column(column: Column, name: &'static str, points: &[TrackPoint]) -> FrameColumn {
    match column {
        Column::StormId => {
            FrameColumn::new(name.into(), points.iter().map(|p| p.storm_id).collect::<Vec<u32>>())
        }
        Column::ValidTime => FrameColumn::new(
            name.into(),
            points
                .iter()
                .map(|p| p.valid_time.format(TIMESTAMP_FORMAT).to_string())
                .collect::<Vec<String>>(),
        ),
        Column::Latitude => {
            FrameColumn::new(name.into(), points.iter().map(|p| p.latitude).collect::<Vec<f64>>())
        }
        Column::Longitude => {
            FrameColumn::new(name.into(), points.iter().map(|p| p.longitude).collect::<Vec<f64>>())
        }
        Column::WindSpeed => FrameColumn::new(
            name.into(),
            points.iter().map(|p| p.wind_speed).collect::<Vec<f64>>(),
        ),
        Column::CentralPressure => FrameColumn::new(
            name.into(),
            points
                .iter()
                .map(|p| p.central_pressure)
                .collect::<Vec<f64>>(),
        ),
        Column::OriginTime => FrameColumn::new(
            name.into(),
            points
                .iter()
                .map(|p| p.origin_time.format(TIMESTAMP_FORMAT).to_string())
                .collect::<Vec<String>>(),
        ),
        Column::LeadTimeHours => FrameColumn::new(
            name.into(),
            points
                .iter()
                .map(|p| p.lead_time_hours)
                .collect::<Vec<i64>>(),
        ),
        Column::Category => FrameColumn::new(
            name.into(),
            points
                .iter()
                .map(|p| StormCategory::from_wind_speed(p.wind_speed).map(|c| c.label()))
                .collect::<Vec<Option<&str>>>(),
        ),
    }
}
