//! R-peak detection for multi-channel physiological recordings.
//!
//! Tab-separated exports are ingested into a [`RecordingTable`], band-limited
//! with an FFT filter, scanned for R-peaks with a sliding window detector and
//! cleaned up by a spacing filter. An optional trigger channel splits the
//! recording into segments that are analyzed independently.

pub mod config;
pub mod constants;
pub mod error;
pub mod ingest;
pub mod intervals;
pub mod output;
pub mod peaks;
pub mod processing;
pub mod recording;
pub mod signal_processing;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{AnalysisConfig, SignalSource};
pub use error::{EcgError, Result};
pub use ingest::{RecordingTable, parse_table, read_table};
pub use intervals::IntervalSummary;
pub use peaks::{Peak, PeakSet};
pub use processing::{Analysis, Chunk, EcgProcessor};
pub use recording::Recording;
