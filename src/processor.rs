//! Conversion pipeline for track files.
//!
//! Resolves the input to a list of track files, converts each one
//! independently (parse, clean, write) on the blocking pool with bounded
//! concurrency, and reports progress and a summary. A failed file is logged
//! and counted without stopping the others.

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::config::ProcessorConfig;
use crate::error::{Result, TrackError};
use crate::models::{FileOutcome, ProcessingStats};
use crate::parser::StormTrackParser;
use crate::transform::CoordinateCleaning;
use crate::writer::TrackWriter;

/// One input file and where its table goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Per-track summary table, when requested
    pub summary_path: Option<PathBuf>,
}

/// Parse, clean and write a single file
#[derive(Debug, Clone)]
pub struct FileConverter {
    parser: StormTrackParser,
    cleaning: CoordinateCleaning,
    writer: TrackWriter,
}

impl FileConverter {
    pub fn from_config(config: &ProcessorConfig) -> Result<Self> {
        Ok(Self {
            parser: StormTrackParser::new(config.layout.clone())?,
            cleaning: config.cleaning,
            writer: TrackWriter::from_config(config),
        })
    }

    pub fn convert(&self, job: &ConversionJob) -> Result<FileOutcome> {
        let result = self.parser.parse_file(&job.input_path)?;
        let lines_skipped = result.stats.lines_skipped();
        if result.stats.truncated_blocks > 0 {
            warn!(
                "{} track(s) truncated at end of {}",
                result.stats.truncated_blocks,
                job.input_path.display()
            );
        }

        let dataset = self.cleaning.apply(result.dataset);
        if dataset.is_empty() {
            warn!("No track points in {}", job.input_path.display());
        }
        let tracks = dataset.track_count();

        let rows_written = self.writer.write(&dataset, &job.output_path)?;
        if let Some(summary_path) = &job.summary_path {
            let summarized = self.writer.write_summary(&dataset, summary_path)?;
            debug!(
                "Wrote {} track summaries to {}",
                summarized,
                summary_path.display()
            );
        }
        info!(
            "Converted {} -> {} ({} rows, {} tracks)",
            job.input_path.display(),
            job.output_path.display(),
            rows_written,
            tracks
        );

        Ok(FileOutcome {
            input_path: job.input_path.clone(),
            output_path: job.output_path.clone(),
            rows_written,
            tracks,
            lines_skipped,
        })
    }
}

/// Main processor for track file conversion
pub struct TrackProcessor {
    config: ProcessorConfig,
    converter: Arc<FileConverter>,
}

impl TrackProcessor {
    /// Create a processor, validating the configuration and input path
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;

        if !config.input_path.exists() {
            return Err(TrackError::InputNotFound {
                path: config.input_path.clone(),
            });
        }

        let converter = Arc::new(FileConverter::from_config(&config)?);
        Ok(Self { config, converter })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        println!("{}", "Starting storm track conversion".bright_green().bold());
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.config.input_path.display()
        );
        println!(
            "  {} {:?} -> {}",
            "Profile:".bright_cyan(),
            self.config.profile,
            self.config.output_format.extension()
        );

        let jobs = self.plan_jobs()?;
        println!(
            "  {} {} track file(s)",
            "Found".bright_green(),
            jobs.len().to_string().bright_white().bold()
        );

        let mut stats = self.run_jobs(jobs).await;
        stats.processing_time_ms = start_time.elapsed().as_millis();

        print_summary(&stats);
        Ok(stats)
    }

    /// Resolve the input into conversion jobs, sorted by input path
    pub fn plan_jobs(&self) -> Result<Vec<ConversionJob>> {
        let input = &self.config.input_path;

        if input.is_file() {
            let input_dir = input.parent().unwrap_or_else(|| Path::new("."));
            let output_path = match &self.config.output_path {
                Some(path) => path.clone(),
                None => self.config.output_file_for(input, input_dir),
            };
            let summary_dir = output_path.parent().unwrap_or(input_dir);
            let summary_path = self.summary_path_for(input, summary_dir);
            return Ok(vec![ConversionJob {
                input_path: input.clone(),
                output_path,
                summary_path,
            }]);
        }

        let output_dir = self
            .config
            .output_path
            .clone()
            .unwrap_or_else(|| input.clone());

        let files = discover_track_files(input, &self.config.file_pattern)?;
        let jobs: Vec<ConversionJob> = files
            .into_iter()
            .map(|input_path| ConversionJob {
                output_path: self.config.output_file_for(&input_path, &output_dir),
                summary_path: self.summary_path_for(&input_path, &output_dir),
                input_path,
            })
            .collect();

        check_output_collisions(&jobs)?;
        Ok(jobs)
    }

    fn summary_path_for(&self, input: &Path, output_dir: &Path) -> Option<PathBuf> {
        self.config
            .write_summary
            .then(|| self.config.summary_file_for(input, output_dir))
    }

    /// Convert jobs concurrently, folding outcomes into statistics
    async fn run_jobs(&self, jobs: Vec<ConversionJob>) -> ProcessingStats {
        let pb = ProgressBar::new(jobs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Converting files");

        let concurrent_limit = self.config.max_concurrent_files.min(jobs.len()).max(1);
        debug!("Converting {} files, {} at a time", jobs.len(), concurrent_limit);

        let stats = stream::iter(jobs)
            .map(|job| {
                let converter = Arc::clone(&self.converter);
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = job.input_path.file_name() {
                        pb.set_message(format!("Converting: {}", file_name.to_string_lossy()));
                    }

                    let input_path = job.input_path.clone();
                    let result = task::spawn_blocking(move || converter.convert(&job))
                        .await
                        .map_err(|e| {
                            TrackError::processing_failed(
                                &input_path,
                                format!("Conversion task failed: {}", e),
                            )
                        })
                        .and_then(|result| result);
                    pb.inc(1);

                    if let Err(e) = &result {
                        error!("Failed to convert {}: {:#}", input_path.display(), e);
                    }
                    result
                }
            })
            .buffer_unordered(concurrent_limit)
            .fold(ProcessingStats::default(), |mut stats, result| async move {
                match result {
                    Ok(outcome) => stats.record(&outcome),
                    Err(_) => stats.files_failed += 1,
                }
                stats
            })
            .await;

        pb.finish_with_message("All track files converted");
        stats
    }
}

/// Reject job lists where two inputs would be written to the same output.
/// Stem sanitizing and extension replacement can map distinct names
/// (`run a.dat`, `run_a.dat`) onto one table.
fn check_output_collisions(jobs: &[ConversionJob]) -> Result<()> {
    let mut targets: HashMap<&Path, Vec<&Path>> = HashMap::new();
    for job in jobs {
        targets
            .entry(job.output_path.as_path())
            .or_default()
            .push(job.input_path.as_path());
    }

    let mut collisions: Vec<String> = targets
        .into_iter()
        .filter(|(_, inputs)| inputs.len() > 1)
        .map(|(output, inputs)| {
            let names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
            format!("{} <- [{}]", output.display(), names.join(", "))
        })
        .collect();

    if collisions.is_empty() {
        return Ok(());
    }
    collisions.sort();
    Err(TrackError::configuration(format!(
        "multiple inputs map to the same output file: {}",
        collisions.join("; ")
    )))
}

/// Resolve once `signal` reports an interrupt. If the signal source cannot
/// be installed the run continues without interrupt support, so this never
/// resolves.
pub async fn wait_for_interrupt<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {}
        Err(e) => {
            warn!("Interrupt handler unavailable, CTRL+C will not stop the run: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Files in `dir` whose names match `pattern`, sorted
pub fn discover_track_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = format!("{}/{}", escaped_dir.trim_end_matches('/'), pattern);
    debug!("Searching for track files with pattern: {}", full_pattern);

    let entries = glob::glob(&full_pattern).map_err(|e| TrackError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Unreadable path while searching: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(TrackError::NoInputFiles {
            pattern: full_pattern,
        });
    }

    Ok(files)
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files converted:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Tracks:".bright_cyan(),
        stats.total_tracks.to_string().bright_white()
    );
    if stats.lines_skipped > 0 {
        println!(
            "  {} {}",
            "Data lines skipped:".bright_yellow(),
            stats.lines_skipped.to_string().bright_yellow()
        );
    }
}

#[cfg(test)]
pub mod tests;
