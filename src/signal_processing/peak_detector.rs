use crate::config::DetectorConfig;
use crate::constants::{
    DEFAULT_COARSE_FRACTION, DEFAULT_FINE_FRACTION, DEFAULT_STEP_MULT, DEFAULT_WINDOW_MULT,
};
use crate::peaks::{Peak, PeakSet};
use crate::recording::Recording;

use super::local_maxima::peaks_above;
use super::peak_refiner::refine_peaks;

/// Windowed two-pass R-peak detector
///
/// Slides a window of `window_mult * sample_rate` samples across the
/// recording in steps of `step_mult * sample_rate` samples. Within each
/// window a coarse pass keeps local maxima at or above a fraction of the
/// window maximum; the fine pass then re-thresholds at a fraction of the
/// mean coarse amplitude, so a single outlier spike does not hide the
/// ordinary beats sharing its window.
///
/// Windows are independent; their candidates are merged, deduplicated by
/// time and passed through [`refine_peaks`].
#[derive(Debug, Clone)]
pub struct PeakDetector {
    window_samples: usize,
    step_samples: usize,
    coarse_fraction: f64,
    fine_fraction: f64,
}

impl PeakDetector {
    pub fn new(config: &DetectorConfig, sample_rate: u32) -> Self {
        let mut detector =
            Self::with_multipliers(sample_rate, config.window_mult, config.step_mult);
        detector.coarse_fraction = config.coarse_fraction;
        detector.fine_fraction = config.fine_fraction;
        detector
    }

    /// Detector with the default thresholds and the given window geometry.
    pub fn with_multipliers(sample_rate: u32, window_mult: f64, step_mult: f64) -> Self {
        let fs = sample_rate as f64;
        let window_samples = (fs * window_mult) as usize;
        let mut step_samples = (fs * step_mult) as usize;
        if step_samples == 0 {
            log::warn!(
                "Step of {} x {} Hz rounds to zero samples, using 1",
                step_mult,
                sample_rate
            );
            step_samples = 1;
        }
        Self {
            window_samples,
            step_samples,
            coarse_fraction: DEFAULT_COARSE_FRACTION,
            fine_fraction: DEFAULT_FINE_FRACTION,
        }
    }

    pub fn window_samples(&self) -> usize {
        self.window_samples
    }

    pub fn step_samples(&self) -> usize {
        self.step_samples
    }

    /// Start indices of the analysis windows for a recording of `len`
    /// samples: multiples of the step strictly below
    /// `len - (window - step)`.
    pub fn window_starts(&self, len: usize) -> Vec<usize> {
        let stop = len as i64 - (self.window_samples as i64 - self.step_samples as i64);
        (0..)
            .step_by(self.step_samples)
            .take_while(|&start: &usize| (start as i64) < stop)
            .collect()
    }

    /// Unmerged per-window candidates, in window order.
    pub fn candidates(&self, recording: &Recording) -> Vec<Peak> {
        let len = recording.len();
        let time = recording.time();
        let amplitude = recording.amplitude();

        let starts = self.window_starts(len);
        let mut silent = 0;
        let candidates: Vec<Peak> = starts
            .iter()
            .flat_map(|&start| {
                let end = (start + self.window_samples).min(len);
                if start >= end {
                    return Vec::new();
                }
                let found = detect_window(
                    &time[start..end],
                    &amplitude[start..end],
                    self.coarse_fraction,
                    self.fine_fraction,
                );
                if found.is_empty() {
                    silent += 1;
                }
                log::trace!("Window {}..{}: {} peaks", start, end, found.len());
                found
            })
            .collect();

        log::debug!(
            "{} candidates from {} windows ({} without peaks)",
            candidates.len(),
            starts.len(),
            silent
        );
        candidates
    }

    /// Detect, merge and refine peaks.
    pub fn detect(&self, recording: &Recording) -> PeakSet {
        if recording.is_empty() {
            return PeakSet::default();
        }
        let merged = PeakSet::from_candidates(self.candidates(recording));
        log::debug!("{} unique candidate peaks", merged.len());
        refine_peaks(merged)
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::with_multipliers(1000, DEFAULT_WINDOW_MULT, DEFAULT_STEP_MULT)
    }
}

/// Two-pass peak search inside one window.
///
/// Returns nothing when the coarse pass finds no maxima; flat or noisy
/// windows are expected.
pub fn detect_window(
    time: &[f64],
    amplitude: &[f64],
    coarse_fraction: f64,
    fine_fraction: f64,
) -> Vec<Peak> {
    let Some(max) = amplitude.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };

    let coarse = peaks_above(amplitude, max * coarse_fraction);
    if coarse.is_empty() {
        return Vec::new();
    }

    let mean = coarse.iter().map(|&i| amplitude[i]).sum::<f64>() / coarse.len() as f64;
    peaks_above(amplitude, mean * fine_fraction)
        .into_iter()
        .map(|i| Peak::new(time[i], amplitude[i]))
        .collect()
}

/// Detect refined peaks with the default thresholds.
pub fn detect_peaks(
    recording: &Recording,
    sample_rate: u32,
    window_mult: f64,
    step_mult: f64,
) -> PeakSet {
    PeakDetector::with_multipliers(sample_rate, window_mult, step_mult).detect(recording)
}
