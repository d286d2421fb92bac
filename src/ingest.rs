//! Tab-separated recording ingestion.
//!
//! Instrument exports start with a free-form preamble followed by rows of
//! tab-separated numbers. The first column of every row is an instrument
//! index/marker and carries no signal; it is replaced by a synthesized time
//! axis. Empty or unparsable cells are zero-filled and counted.

use std::path::Path;

use crate::error::{EcgError, Result};
use crate::recording::{Recording, time_axis};

/// Ingested multi-column table.
///
/// Column 0 is time; columns `1..column_count()` are signal channels
/// addressed by 1-based index.
#[derive(Debug, Clone)]
pub struct RecordingTable {
    columns: Vec<Vec<f64>>,
    missing: usize,
    sample_rate: u32,
}

impl RecordingTable {
    pub fn row_count(&self) -> usize {
        self.columns[0].len()
    }

    /// Number of columns including the time column.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of signal channels (columns after time).
    pub fn channel_count(&self) -> usize {
        self.columns.len() - 1
    }

    /// Cells that were empty or unparsable and were replaced by zero.
    pub fn missing_count(&self) -> usize {
        self.missing
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn time(&self) -> &[f64] {
        &self.columns[0]
    }

    /// Channel values for a 1-based column index.
    pub fn channel(&self, column: usize) -> Result<&[f64]> {
        if column == 0 || column >= self.columns.len() {
            return Err(EcgError::ColumnOutOfRange {
                column,
                available: self.channel_count(),
            });
        }
        Ok(&self.columns[column])
    }

    /// `[time, channel]` recording for a 1-based column index.
    pub fn recording(&self, column: usize) -> Result<Recording> {
        let amplitude = self.channel(column)?.to_vec();
        Recording::new(self.time().to_vec(), amplitude)
    }
}

/// Read and parse a recording file.
///
/// The file is decoded as ISO-8859-1: every byte maps to the char with the
/// same code point, so instrument preambles with stray high bytes never
/// fail to decode.
pub fn read_table<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<RecordingTable> {
    let bytes = std::fs::read(path.as_ref())?;
    let text: String = bytes.iter().map(|&b| b as char).collect();
    log::debug!(
        "Read {} bytes from {}",
        bytes.len(),
        path.as_ref().display()
    );
    parse_table(&text, sample_rate)
}

/// Parse tab-separated recording text into a table.
pub fn parse_table(text: &str, sample_rate: u32) -> Result<RecordingTable> {
    if sample_rate == 0 {
        return Err(EcgError::Config("sample rate must be positive".to_string()));
    }

    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| is_data_line(l)).unwrap_or(0);
    if first > 0 {
        log::debug!("Skipping {} preamble lines", first);
    }

    let mut width: Option<usize> = None;
    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();

    for (offset, line) in lines[first..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = first + offset + 1;
        let mut row: Vec<Option<f64>> = line.split('\t').map(parse_cell).collect();

        let expected = *width.get_or_insert(row.len());
        if row.len() > expected {
            return Err(EcgError::Format {
                line: line_no,
                reason: format!("expected {} fields, saw {}", expected, row.len()),
            });
        }
        row.resize(expected, None);
        rows.push(row);
    }

    let Some(width) = width else {
        return Err(EcgError::Format {
            line: first + 1,
            reason: "no data rows".to_string(),
        });
    };

    // The marker column is dropped and the time axis takes its slot.
    if width < 2 {
        return Err(EcgError::InsufficientColumns {
            needed: 2,
            found: width,
        });
    }

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(width);
    columns.push(time_axis(rows.len(), sample_rate));
    let mut missing = 0;
    for col in 1..width {
        let values = rows
            .iter()
            .map(|row| {
                row[col].unwrap_or_else(|| {
                    missing += 1;
                    0.0
                })
            })
            .collect();
        columns.push(values);
    }

    if missing > 0 {
        log::warn!("Replaced {} missing values with zero", missing);
    }
    log::info!(
        "Ingested {} rows x {} columns at {} Hz",
        rows.len(),
        width,
        sample_rate
    );

    Ok(RecordingTable {
        columns,
        missing,
        sample_rate,
    })
}

/// A line made only of digits, whitespace, `.` and `-`.
fn is_data_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '.' || c == '-')
}

fn parse_cell(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
