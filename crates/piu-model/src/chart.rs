//! Note chart decoding.
//!
//! A chart file lists each column's notes as `start end` lines (decimal
//! milliseconds from song start) and closes the column with a `*` line:
//!
//! ```text
//! 1000 1001
//! 1500 1900
//! *
//! 1200 1201
//! *
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::timeline::NoteTimeline;

/// Per-column note data as read from a chart file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chart {
    /// `(start, end)` pairs per column, ascending and non-overlapping.
    pub columns: Vec<Vec<(i64, i64)>>,
}

impl Chart {
    pub fn new(columns: Vec<Vec<(i64, i64)>>) -> Self {
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn note_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Latest end time across all columns, or 0 for a chart without notes.
    pub fn last_end_ms(&self) -> i64 {
        self.columns
            .iter()
            .filter_map(|c| c.last().map(|&(_, end)| end))
            .max()
            .unwrap_or(0)
    }

    /// Build a fresh timeline per column. Every call returns independent hit state.
    pub fn build_timelines(&self, quantum_ms: i64) -> Vec<NoteTimeline> {
        self.columns
            .iter()
            .map(|pairs| NoteTimeline::new(pairs, quantum_ms))
            .collect()
    }
}

/// Chart file decoder
pub struct ChartDecoder;

impl ChartDecoder {
    /// Location of a song's chart: `<songs_dir>/<song>/<song>NoteData.txt`.
    pub fn song_path(songs_dir: &Path, song: &str) -> PathBuf {
        songs_dir.join(song).join(format!("{song}NoteData.txt"))
    }

    pub fn decode(path: &Path) -> Result<Chart, ChartError> {
        let content = std::fs::read_to_string(path).map_err(|e| ChartError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let chart = Self::decode_str(&content)?;
        debug!(
            "Decoded chart {}: {} columns, {} notes",
            path.display(),
            chart.column_count(),
            chart.note_count()
        );
        Ok(chart)
    }

    pub fn decode_str(content: &str) -> Result<Chart, ChartError> {
        let mut columns: Vec<Vec<(i64, i64)>> = Vec::new();
        let mut current: Vec<(i64, i64)> = Vec::new();
        // Whether a column has been opened since the last terminator
        let mut open = false;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "*" {
                columns.push(std::mem::take(&mut current));
                open = false;
                continue;
            }

            let (start, end) = parse_pair(line, line_no)?;
            if end < start {
                return Err(ChartError::InvertedInterval {
                    line: line_no,
                    start,
                    end,
                });
            }
            if let Some(&(prev_start, prev_end)) = current.last()
                && (start <= prev_start || start < prev_end)
            {
                return Err(ChartError::Unsorted { line: line_no });
            }
            current.push((start, end));
            open = true;
        }

        if open {
            return Err(ChartError::MissingTerminator {
                column: columns.len(),
            });
        }
        if columns.is_empty() {
            return Err(ChartError::EmptyChart);
        }
        Ok(Chart { columns })
    }
}

fn parse_pair(line: &str, line_no: usize) -> Result<(i64, i64), ChartError> {
    let mut fields = line.split_whitespace();
    let start = match fields.next() {
        Some(text) => parse_time(text, line_no)?,
        None => return Err(ChartError::MissingField { line: line_no }),
    };
    let end = match fields.next() {
        Some(text) => parse_time(text, line_no)?,
        None => return Err(ChartError::MissingField { line: line_no }),
    };
    if let Some(extra) = fields.next() {
        return Err(ChartError::UnexpectedToken {
            line: line_no,
            text: extra.to_string(),
        });
    }
    Ok((start, end))
}

fn parse_time(text: &str, line_no: usize) -> Result<i64, ChartError> {
    text.parse::<u32>()
        .map(i64::from)
        .map_err(|_| ChartError::InvalidNumber {
            line: line_no,
            text: text.to_string(),
        })
}
