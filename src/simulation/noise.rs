use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub wander: Option<BaselineWanderConfig>,
    pub mains: Option<MainsConfig>,
    pub impulse: Option<ImpulseNoiseConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f64) -> Self {
        self.additive = Some(AdditiveNoiseConfig { snr_db });
        self
    }

    pub fn with_wander(mut self, amplitude: f64, freq_hz: f64) -> Self {
        self.wander = Some(BaselineWanderConfig { amplitude, freq_hz });
        self
    }

    pub fn with_mains(mut self, amplitude: f64, freq_hz: f64) -> Self {
        self.mains = Some(MainsConfig { amplitude, freq_hz });
        self
    }

    pub fn with_impulse(mut self, rate_hz: f64, amplitude: f64, duration_samples: usize) -> Self {
        self.impulse = Some(ImpulseNoiseConfig {
            rate_hz,
            amplitude,
            duration_samples,
        });
        self
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub snr_db: f64,
}

/// Slow sinusoidal drift of the baseline (respiration, electrode motion).
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BaselineWanderConfig {
    pub amplitude: f64,
    pub freq_hz: f64,
}

/// Power-line interference.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct MainsConfig {
    pub amplitude: f64,
    pub freq_hz: f64,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ImpulseNoiseConfig {
    pub rate_hz: f64,
    pub amplitude: f64,
    pub duration_samples: usize,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

fn apply_additive_noise(signal: &mut [f64], config: &AdditiveNoiseConfig, rng: &mut ChaCha8Rng) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f64.powf(config.snr_db / 10.0);
    let noise_std = (sig_power / snr_linear).sqrt();

    let Ok(normal) = Normal::new(0.0, noise_std) else {
        log::warn!("Invalid noise deviation {}, skipping AWGN", noise_std);
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

fn add_sinusoid(signal: &mut [f64], amplitude: f64, freq_hz: f64, sample_rate: f64) {
    for (i, sample) in signal.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        *sample += amplitude * (2.0 * PI * freq_hz * t).sin();
    }
}

fn apply_impulse_noise(
    signal: &mut [f64],
    config: &ImpulseNoiseConfig,
    sample_rate: f64,
    rng: &mut ChaCha8Rng,
) {
    let n = signal.len();
    if n == 0 || config.rate_hz <= 0.0 {
        return;
    }

    let avg_samples_between_impulses = sample_rate / config.rate_hz;

    let mut pos = 0usize;
    loop {
        let interval = (rng.random::<f64>() * 2.0 * avg_samples_between_impulses) as usize;
        pos += interval.max(1);

        if pos >= n {
            break;
        }

        let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
        let end = (pos + config.duration_samples).min(n);

        for sample in signal[pos..end].iter_mut() {
            *sample += sign * config.amplitude;
        }
    }
}

/// Corrupt a clean signal. AWGN is scaled against the clean signal power.
pub fn apply_noise(clean_signal: &[f64], config: &NoiseConfig, sample_rate: u32) -> Vec<f64> {
    let fs = sample_rate as f64;
    let mut signal = clean_signal.to_vec();
    let mut rng = create_rng(config.seed);

    if let Some(ref additive_config) = config.additive {
        apply_additive_noise(&mut signal, additive_config, &mut rng);
    }

    if let Some(ref wander) = config.wander {
        add_sinusoid(&mut signal, wander.amplitude, wander.freq_hz, fs);
    }

    if let Some(ref mains) = config.mains {
        add_sinusoid(&mut signal, mains.amplitude, mains.freq_hz, fs);
    }

    if let Some(ref impulse_config) = config.impulse {
        apply_impulse_noise(&mut signal, impulse_config, fs, &mut rng);
    }

    signal
}
