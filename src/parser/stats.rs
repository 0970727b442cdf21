//! Parsing statistics and result structures for track files

use serde::{Deserialize, Serialize};

use super::line_parser::LineSkip;
use crate::constants::MAX_RECORDED_SKIPS;
use crate::models::ParsedDataset;

/// Parsed dataset with the counters gathered while scanning
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub dataset: ParsedDataset,
    pub stats: ParseStats,
}

/// Counters for one scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of input lines
    pub total_lines: usize,

    /// Header lines that opened a block
    pub headers_parsed: usize,

    /// Lines starting with the marker whose header fields were invalid
    pub headers_rejected: usize,

    /// Lines consumed as data lines by some block
    pub data_lines: usize,

    /// Track points produced
    pub points_parsed: usize,

    /// Data lines with too few fields
    pub short_lines: usize,

    /// Data lines with a bad number or calendar date
    pub malformed_lines: usize,

    /// Blocks cut off by the end of input
    pub truncated_blocks: usize,

    /// First few skip diagnostics, as "line N: reason"
    pub skipped: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped data line. `line_index` is zero-based.
    pub fn record_data_skip(&mut self, line_index: usize, skip: &LineSkip) {
        match skip {
            LineSkip::ShortLine { .. } => self.short_lines += 1,
            _ => self.malformed_lines += 1,
        }
        self.remember(line_index, skip);
    }

    /// Record a rejected header line. `line_index` is zero-based.
    pub fn record_header_skip(&mut self, line_index: usize, skip: &LineSkip) {
        self.headers_rejected += 1;
        self.remember(line_index, skip);
    }

    fn remember(&mut self, line_index: usize, skip: &LineSkip) {
        if self.skipped.len() < MAX_RECORDED_SKIPS {
            self.skipped.push(format!("line {}: {}", line_index + 1, skip));
        }
    }

    /// Data lines that produced no point
    pub fn lines_skipped(&self) -> usize {
        self.short_lines + self.malformed_lines
    }

    /// Share of data lines that produced a point, as a percentage
    pub fn yield_rate(&self) -> f64 {
        if self.data_lines == 0 {
            0.0
        } else {
            (self.points_parsed as f64 / self.data_lines as f64) * 100.0
        }
    }
}
