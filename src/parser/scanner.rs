//! Forward scan over a storm-track text file
//!
//! The scan keeps a single line cursor. Lines are skipped until one opens a
//! block, then exactly `point_count` raw lines are consumed as data lines
//! whether or not each one yields a point. A block that runs past the end
//! of input ends early.

use std::path::Path;
use tracing::{debug, info, warn};

use super::columns::TrackColumns;
use super::layout::FieldLayout;
use super::line_parser::{LineSkip, parse_data_line, parse_header_line};
use super::stats::{ParseResult, ParseStats};
use crate::error::Result;

/// Parser for forecast-block track files
#[derive(Debug, Clone, Default)]
pub struct StormTrackParser {
    layout: FieldLayout,
}

impl StormTrackParser {
    /// Create a parser for a validated field layout
    pub fn new(layout: FieldLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Read a whole file and parse it
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing track file: {}", file_path.display());

        let content = std::fs::read_to_string(file_path)?;
        let result = self.parse_str(&content)?;

        info!(
            "Parsed {} points in {} tracks from {} ({} data lines skipped)",
            result.stats.points_parsed,
            result.dataset.track_count(),
            file_path.display(),
            result.stats.lines_skipped()
        );

        Ok(result)
    }

    /// Parse text already held in memory
    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        let lines: Vec<&str> = content.lines().collect();
        self.parse_lines(&lines)
    }

    /// Parse a sequence of lines
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParseResult> {
        let mut stats = ParseStats::new();
        let mut columns = TrackColumns::new();
        let mut storm_id = 0u32;
        let mut cursor = 0usize;

        stats.total_lines = lines.len();

        while cursor < lines.len() {
            let header = match parse_header_line(lines[cursor].as_ref(), &self.layout) {
                Ok(header) => header,
                Err(LineSkip::NotHeader) => {
                    cursor += 1;
                    continue;
                }
                Err(skip) => {
                    debug!("Rejected header at line {}: {}", cursor + 1, skip);
                    stats.record_header_skip(cursor, &skip);
                    cursor += 1;
                    continue;
                }
            };

            cursor += 1;
            storm_id += 1;
            stats.headers_parsed += 1;

            for consumed in 0..header.point_count {
                let Some(line) = lines.get(cursor) else {
                    warn!(
                        "Track {} truncated at end of input: {} of {} lines present",
                        storm_id, consumed, header.point_count
                    );
                    stats.truncated_blocks += 1;
                    break;
                };

                stats.data_lines += 1;
                match parse_data_line(line.as_ref(), &self.layout, &header, storm_id) {
                    Ok(point) => {
                        columns.push(point);
                        stats.points_parsed += 1;
                    }
                    Err(skip) => {
                        debug!("Skipped line {}: {}", cursor + 1, skip);
                        stats.record_data_skip(cursor, &skip);
                    }
                }
                cursor += 1;
            }
        }

        let dataset = columns.finish()?;

        Ok(ParseResult { dataset, stats })
    }
}
