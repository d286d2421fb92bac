use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::config::FilterConfig;
use crate::error::{EcgError, Result};
use crate::recording::Recording;

/// Brick-wall FFT bandpass over a whole recording
///
/// Transforms the full amplitude column in one pass, zeroes every bin whose
/// absolute frequency lies outside `[low_hz, high_hz]`, and takes the real
/// part of the inverse transform. The filter is zero-phase, so peaks stay
/// on the sample where they were.
pub struct FftBandpass {
    low_hz: f64,
    high_hz: f64,
    sample_rate: u32,
}

impl FftBandpass {
    pub fn new(low_hz: f64, high_hz: f64, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(EcgError::Config("sample rate must be positive".to_string()));
        }
        if !(low_hz >= 0.0 && high_hz > low_hz) {
            return Err(EcgError::Config(format!(
                "invalid passband {}-{} Hz",
                low_hz, high_hz
            )));
        }
        Ok(Self {
            low_hz,
            high_hz,
            sample_rate,
        })
    }

    pub fn from_config(config: &FilterConfig, sample_rate: u32) -> Result<Self> {
        Self::new(config.low_hz, config.high_hz, sample_rate)
    }

    /// Filter an amplitude sequence.
    pub fn process(&self, samples: &[f64]) -> Vec<f64> {
        let n = samples.len();
        if n == 0 {
            return Vec::new();
        }

        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);

        let mut spectrum: Vec<Complex64> =
            samples.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        forward.process(&mut spectrum);

        let fs = self.sample_rate as f64;
        let mut zeroed = 0;
        for (k, bin) in spectrum.iter_mut().enumerate() {
            let freq = bin_frequency(k, n, fs).abs();
            if freq < self.low_hz || freq > self.high_hz {
                *bin = Complex64::new(0.0, 0.0);
                zeroed += 1;
            }
        }
        log::trace!("Zeroed {} of {} bins", zeroed, n);

        inverse.process(&mut spectrum);
        let scale = 1.0 / n as f64;
        spectrum.iter().map(|c| c.re * scale).collect()
    }

    /// Filter a recording, keeping its time axis.
    pub fn apply(&self, recording: &Recording) -> Recording {
        recording.replace_amplitude(self.process(recording.amplitude()))
    }
}

/// Signed frequency of FFT bin `k` for an `n`-point transform.
///
/// Bins `0..=(n-1)/2` are non-negative, the rest wrap to negative
/// frequencies.
pub fn bin_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let step = sample_rate / n as f64;
    if k <= (n - 1) / 2 {
        k as f64 * step
    } else {
        (k as f64 - n as f64) * step
    }
}
