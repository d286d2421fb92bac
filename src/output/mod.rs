mod csv;
mod json;
mod text;

use serde::Serialize;

use crate::error::Result;
use crate::intervals::IntervalSummary;
use crate::processing::Chunk;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One-line summary of an analyzed chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub file: String,
    pub label: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub samples: usize,
    pub peaks: usize,
    /// dB; `None` when detection ran on the raw signal
    pub quality_db: Option<f64>,
    pub intervals: Option<IntervalSummary>,
}

impl ChunkReport {
    pub fn from_chunk(file: &str, label: &str, chunk: &Chunk) -> Result<Self> {
        let (start_secs, end_secs) = chunk.time_span();
        Ok(Self {
            file: file.to_string(),
            label: label.to_string(),
            start_secs,
            end_secs,
            samples: chunk.raw.len(),
            peaks: chunk.peaks.len(),
            quality_db: chunk.quality_db()?,
            intervals: chunk.intervals(),
        })
    }
}

pub trait Formatter {
    fn format(&self, report: &ChunkReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// `m:ss` rendering of a time in seconds.
pub fn minutes_seconds(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_report(with_intervals: bool) -> ChunkReport {
        ChunkReport {
            file: "rec01.txt".to_string(),
            label: "segment 1/3".to_string(),
            start_secs: 0.0,
            end_secs: 65.5,
            samples: 65_500,
            peaks: 80,
            quality_db: Some(12.345),
            intervals: with_intervals.then(|| IntervalSummary {
                count: 79,
                mean: 0.8,
                std_dev: 0.05,
                min: 0.61,
                min_at: 12.0,
                max: 1.02,
                max_at: 40.5,
                heart_rate_bpm: 75.0,
                normal_fraction: 1.0,
            }),
        }
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(minutes_seconds(0.0), "0:00");
        assert_eq!(minutes_seconds(65.9), "1:05");
        assert_eq!(minutes_seconds(600.0), "10:00");
    }
}
