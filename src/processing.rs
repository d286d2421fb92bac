use crate::config::AnalysisConfig;
use crate::error::{EcgError, Result};
use crate::ingest::RecordingTable;
use crate::intervals::IntervalSummary;
use crate::peaks::PeakSet;
use crate::recording::Recording;
use crate::signal_processing::{
    FftBandpass, PeakDetector, PulseSegmenter, Segment, refine_peaks, signal_to_noise,
};

/// Whole-recording pipeline driven by an [`AnalysisConfig`].
pub struct EcgProcessor {
    config: AnalysisConfig,
    bandpass: FftBandpass,
    detector: PeakDetector,
    segmenter: PulseSegmenter,
}

impl EcgProcessor {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let sample_rate = config.input.sample_rate;
        Ok(Self {
            config: config.clone(),
            bandpass: FftBandpass::from_config(&config.filter, sample_rate)?,
            detector: PeakDetector::new(&config.detector, sample_rate),
            segmenter: PulseSegmenter::new(&config.segmenter, sample_rate),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Filter, detect, measure quality and segment one ingested table.
    pub fn analyze(&self, table: &RecordingTable) -> Result<Analysis> {
        if table.sample_rate() != self.config.input.sample_rate {
            return Err(EcgError::Config(format!(
                "table sampled at {} Hz, processor configured for {} Hz",
                table.sample_rate(),
                self.config.input.sample_rate
            )));
        }

        let raw = table.recording(self.config.input.ecg_column)?;
        let filtered = self.bandpass.apply(&raw);
        let filtering = self.config.filtering();

        let peaks = if filtering {
            self.detector.detect(&filtered)
        } else {
            self.detector.detect(&raw)
        };

        let quality_db = if filtering {
            Some(signal_to_noise(&filtered, &raw)?)
        } else {
            None
        };

        let segments = match self.config.input.pulse_column {
            Some(column) => Some(self.segmenter.segment(table.channel(column)?)),
            None => None,
        };

        log::info!(
            "Detected {} peaks over {} samples{}",
            peaks.len(),
            raw.len(),
            segments
                .as_ref()
                .map(|s| format!(", {} segments", s.len()))
                .unwrap_or_default()
        );

        Ok(Analysis {
            raw,
            filtered,
            peaks,
            quality_db,
            segments,
            filtering,
            sample_rate: self.config.input.sample_rate,
        })
    }

    /// Re-run the spacing filter on a peak set edited outside the pipeline.
    pub fn rerun(&self, peaks: PeakSet) -> PeakSet {
        refine_peaks(peaks)
    }
}

/// Result of a full-recording analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub raw: Recording,
    pub filtered: Recording,
    pub peaks: PeakSet,
    /// `None` when detection ran on the raw signal
    pub quality_db: Option<f64>,
    /// Present when a pulse column was configured
    pub segments: Option<Vec<Segment>>,
    filtering: bool,
    sample_rate: u32,
}

impl Analysis {
    /// The signal peaks were detected on.
    pub fn primary(&self) -> &Recording {
        if self.filtering { &self.filtered } else { &self.raw }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.as_ref().map_or(0, |s| s.len())
    }

    /// Chunk covering the whole recording.
    pub fn whole(&self) -> Result<Chunk> {
        self.chunk_range(Segment::new(0, self.raw.len()))
    }

    /// Chunk for the segment at `index`.
    pub fn chunk(&self, index: usize) -> Result<Chunk> {
        let segment = self
            .segments
            .as_ref()
            .and_then(|s| s.get(index))
            .copied()
            .ok_or_else(|| {
                EcgError::Config(format!(
                    "segment {} not available ({} segments)",
                    index,
                    self.segment_count()
                ))
            })?;
        self.chunk_range(segment)
    }

    /// Chunk between two times in seconds.
    pub fn time_range(&self, start_secs: f64, end_secs: f64) -> Result<Chunk> {
        if !(start_secs >= 0.0) || start_secs > end_secs {
            return Err(EcgError::Config(format!(
                "invalid time range {}s - {}s",
                start_secs, end_secs
            )));
        }
        let fs = self.sample_rate as f64;
        let start = (start_secs * fs) as usize;
        let end = ((end_secs * fs) as usize).min(self.raw.len());
        self.chunk_range(Segment::new(start.min(end), end))
    }

    fn chunk_range(&self, segment: Segment) -> Result<Chunk> {
        if segment.is_empty() {
            return Err(EcgError::InvalidRange {
                start: segment.start,
                end: segment.end,
                len: self.raw.len(),
            });
        }
        let raw = self.raw.slice(segment.range())?;
        let filtered = self.filtered.slice(segment.range())?;
        let peaks = match raw.time_span() {
            Some((first, last)) => self.peaks.within(first, last),
            None => PeakSet::default(),
        };
        Ok(Chunk {
            segment,
            raw,
            filtered,
            peaks,
            filtering: self.filtering,
        })
    }
}

/// A slice of an analysis: one segment or time range.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub segment: Segment,
    pub raw: Recording,
    pub filtered: Recording,
    pub peaks: PeakSet,
    filtering: bool,
}

impl Chunk {
    pub fn primary(&self) -> &Recording {
        if self.filtering { &self.filtered } else { &self.raw }
    }

    /// Quality of the filtered slice against the raw slice, when filtering.
    pub fn quality_db(&self) -> Result<Option<f64>> {
        if !self.filtering {
            return Ok(None);
        }
        signal_to_noise(&self.filtered, &self.raw).map(Some)
    }

    pub fn intervals(&self) -> Option<IntervalSummary> {
        IntervalSummary::from_peaks(&self.peaks)
    }

    /// Start and end time in seconds.
    pub fn time_span(&self) -> (f64, f64) {
        self.raw.time_span().unwrap_or((0.0, 0.0))
    }
}
