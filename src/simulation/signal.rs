/// Gaussian-bump model of a periodic ECG: one R wave and one T wave per beat.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct EcgModel {
    pub heart_rate_bpm: f64,
    /// Time of the first R peak in seconds
    pub first_beat_secs: f64,
    pub r_amplitude: f64,
    /// Standard deviation of the R bump in seconds
    pub r_width_secs: f64,
    pub t_amplitude: f64,
    /// Delay from R peak to T peak in seconds
    pub t_delay_secs: f64,
    pub t_width_secs: f64,
}

impl Default for EcgModel {
    fn default() -> Self {
        Self {
            heart_rate_bpm: 60.0,
            first_beat_secs: 0.25,
            r_amplitude: 1.0,
            r_width_secs: 0.010,
            t_amplitude: 0.3,
            t_delay_secs: 0.3,
            t_width_secs: 0.040,
        }
    }
}

impl EcgModel {
    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate_bpm = bpm;
        self
    }

    pub fn beat_period(&self) -> f64 {
        60.0 / self.heart_rate_bpm
    }

    /// R peak times strictly below `duration_secs`.
    pub fn beat_times(&self, duration_secs: f64) -> Vec<f64> {
        let period = self.beat_period();
        if !(period > 0.0) {
            return Vec::new();
        }
        (0..)
            .map(|k| self.first_beat_secs + k as f64 * period)
            .take_while(|&t| t < duration_secs)
            .collect()
    }

    pub fn generate(&self, duration_secs: f64, sample_rate: u32) -> Vec<f64> {
        let fs = sample_rate as f64;
        let num_samples = (duration_secs * fs) as usize;
        let mut samples = vec![0.0; num_samples];

        for beat in self.beat_times(duration_secs) {
            add_bump(&mut samples, fs, beat, self.r_amplitude, self.r_width_secs);
            add_bump(
                &mut samples,
                fs,
                beat + self.t_delay_secs,
                self.t_amplitude,
                self.t_width_secs,
            );
        }

        samples
    }
}

/// Add a Gaussian bump, evaluated within five widths of its centre.
fn add_bump(samples: &mut [f64], fs: f64, centre: f64, amplitude: f64, width: f64) {
    if width <= 0.0 || samples.is_empty() {
        return;
    }
    let reach = 5.0 * width;
    let first = ((centre - reach) * fs).floor().max(0.0) as usize;
    let last = (((centre + reach) * fs).ceil().max(0.0) as usize).min(samples.len() - 1);
    for (i, sample) in samples.iter_mut().enumerate().take(last + 1).skip(first) {
        let dt = i as f64 / fs - centre;
        *sample += amplitude * (-0.5 * (dt / width).powi(2)).exp();
    }
}

/// Zero signal with `amplitude` at each listed sample index.
pub fn spike_train(len: usize, positions: &[usize], amplitude: f64) -> Vec<f64> {
    let mut samples = vec![0.0; len];
    for &p in positions.iter().filter(|&&p| p < len) {
        samples[p] = amplitude;
    }
    samples
}

/// Piecewise-constant trigger channel from `(level, length)` parts.
pub fn trigger_channel(parts: &[(f64, usize)]) -> Vec<f64> {
    parts
        .iter()
        .flat_map(|&(level, len)| std::iter::repeat_n(level, len))
        .collect()
}
