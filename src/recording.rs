use std::ops::Range;

use crate::error::{EcgError, Result};

/// A single-channel recording as parallel time and amplitude columns.
///
/// Times come from the ingestion time axis (`i / sample_rate`) and are
/// carried through slicing unchanged, so a slice of a recording still
/// reports absolute times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recording {
    time: Vec<f64>,
    amplitude: Vec<f64>,
}

impl Recording {
    /// Build a recording from matching time and amplitude columns.
    pub fn new(time: Vec<f64>, amplitude: Vec<f64>) -> Result<Self> {
        if time.len() != amplitude.len() {
            return Err(EcgError::ShapeMismatch {
                left: time.len(),
                right: amplitude.len(),
            });
        }
        Ok(Self { time, amplitude })
    }

    /// Build a recording with a synthesized time axis `i / sample_rate`.
    pub fn from_amplitude(amplitude: Vec<f64>, sample_rate: u32) -> Self {
        let time = time_axis(amplitude.len(), sample_rate);
        Self { time, amplitude }
    }

    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }

    /// Same time axis, new amplitude column.
    pub fn with_amplitude(&self, amplitude: Vec<f64>) -> Result<Self> {
        Self::new(self.time.clone(), amplitude)
    }

    /// Same time axis, amplitude from a length-preserving transform.
    pub(crate) fn replace_amplitude(&self, amplitude: Vec<f64>) -> Self {
        debug_assert_eq!(amplitude.len(), self.time.len());
        Self {
            time: self.time.clone(),
            amplitude,
        }
    }

    /// Copy out the samples in `range`.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.start > range.end || range.end > self.len() {
            return Err(EcgError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        Ok(Self {
            time: self.time[range.clone()].to_vec(),
            amplitude: self.amplitude[range].to_vec(),
        })
    }

    /// First and last time stamp, if any.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.time.last()?))
    }

    /// Iterate `(time, amplitude)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.amplitude.iter().copied())
    }
}

/// Uniform time axis of `len` samples at `sample_rate` Hz.
pub fn time_axis(len: usize, sample_rate: u32) -> Vec<f64> {
    let fs = sample_rate as f64;
    (0..len).map(|i| i as f64 / fs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_axis_is_uniform() {
        let axis = time_axis(5, 4);
        assert_eq!(axis, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_new_rejects_mismatched_columns() {
        let err = Recording::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            EcgError::ShapeMismatch { left: 2, right: 1 }
        ));
    }

    #[test]
    fn test_slice_keeps_absolute_times() {
        let rec = Recording::from_amplitude(vec![0.0, 1.0, 2.0, 3.0], 2);
        let part = rec.slice(1..3).unwrap();
        assert_eq!(part.time(), &[0.5, 1.0]);
        assert_eq!(part.amplitude(), &[1.0, 2.0]);
        assert_eq!(part.time_span(), Some((0.5, 1.0)));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let rec = Recording::from_amplitude(vec![0.0; 4], 2);
        assert!(rec.slice(2..5).is_err());
    }

    #[test]
    fn test_empty_recording_has_no_span() {
        let rec = Recording::default();
        assert!(rec.is_empty());
        assert_eq!(rec.time_span(), None);
    }
}
