//! Configuration for the R-peak pipeline.
//!
//! Every section has a `Default` carrying the tuned constants from
//! [`crate::constants`]. A TOML file may override any subset of fields:
//!
//! ```toml
//! [input]
//! sample_rate = 1000
//! ecg_column = 1
//! pulse_column = 4
//! source = "filtered"
//!
//! [detector]
//! window_mult = 1.5
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_COARSE_FRACTION, DEFAULT_FINE_FRACTION, DEFAULT_MIN_SEGMENT_MULT,
    DEFAULT_PASSBAND_HIGH_HZ, DEFAULT_PASSBAND_LOW_HZ, DEFAULT_STEP_MULT,
    DEFAULT_TRIGGER_FRACTION, DEFAULT_WINDOW_MULT,
};
use crate::error::{EcgError, Result};

/// Which signal variant peak detection runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    /// Band-limited signal; quality is reported against the raw signal
    Filtered,
    /// Unfiltered signal; quality is not applicable
    Raw,
}

/// Complete analysis configuration
///
/// # Example
/// ```
/// use rpeak::config::{AnalysisConfig, SignalSource};
///
/// let mut config = AnalysisConfig::default();
/// config.input.source = SignalSource::Raw;
/// config.detector.window_mult = 2.0;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: InputConfig,
    pub filter: FilterConfig,
    pub detector: DetectorConfig,
    pub segmenter: SegmenterConfig,
}

/// Input selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// 1-based column holding the ECG channel
    pub ecg_column: usize,
    /// 1-based column holding the trigger/pulse channel, if any
    pub pulse_column: Option<usize>,
    /// Signal variant used for detection
    pub source: SignalSource,
}

/// FFT bandpass cutoffs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Lower cutoff in Hz
    pub low_hz: f64,
    /// Upper cutoff in Hz
    pub high_hz: f64,
}

/// Windowed two-pass peak detection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Window length as a multiple of the sample rate
    pub window_mult: f64,
    /// Window step as a multiple of the sample rate
    pub step_mult: f64,
    /// Coarse pass height as a fraction of the window maximum
    pub coarse_fraction: f64,
    /// Fine pass height as a fraction of the mean coarse amplitude
    pub fine_fraction: f64,
}

/// Trigger-channel segmentation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Minimum segment length as a multiple of the sample rate
    pub min_length_mult: f64,
    /// Trigger level as a fraction of the channel maximum
    pub threshold_fraction: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000,
            ecg_column: 1,
            pulse_column: None,
            source: SignalSource::Filtered,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            low_hz: DEFAULT_PASSBAND_LOW_HZ,
            high_hz: DEFAULT_PASSBAND_HIGH_HZ,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_mult: DEFAULT_WINDOW_MULT,
            step_mult: DEFAULT_STEP_MULT,
            coarse_fraction: DEFAULT_COARSE_FRACTION,
            fine_fraction: DEFAULT_FINE_FRACTION,
        }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_length_mult: DEFAULT_MIN_SEGMENT_MULT,
            threshold_fraction: DEFAULT_TRIGGER_FRACTION,
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Whether detection runs on the filtered signal.
    pub fn filtering(&self) -> bool {
        self.input.source == SignalSource::Filtered
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.sample_rate == 0 {
            return Err(EcgError::Config("sample rate must be positive".to_string()));
        }
        if self.input.ecg_column == 0 {
            return Err(EcgError::Config(
                "ECG column index is 1-based".to_string(),
            ));
        }
        if self.input.pulse_column == Some(0) {
            return Err(EcgError::Config(
                "pulse column index is 1-based".to_string(),
            ));
        }
        if !(self.filter.low_hz >= 0.0 && self.filter.high_hz > self.filter.low_hz) {
            return Err(EcgError::Config(format!(
                "invalid passband {}-{} Hz",
                self.filter.low_hz, self.filter.high_hz
            )));
        }
        if !(self.detector.window_mult > 0.0 && self.detector.step_mult > 0.0) {
            return Err(EcgError::Config(
                "window and step multipliers must be positive".to_string(),
            ));
        }
        if self.segmenter.min_length_mult < 0.0 {
            return Err(EcgError::Config(
                "minimum segment multiplier must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.filter.low_hz, 0.5);
        assert_eq!(config.filter.high_hz, 15.0);
        assert_eq!(config.detector.window_mult, 1.0);
        assert_eq!(config.detector.step_mult, 0.5);
        assert_eq!(config.segmenter.min_length_mult, 5.0);
        assert!(config.filtering());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [input]
            sample_rate = 500
            pulse_column = 4
            source = "raw"

            [detector]
            step_mult = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.input.sample_rate, 500);
        assert_eq!(config.input.ecg_column, 1);
        assert_eq!(config.input.pulse_column, Some(4));
        assert_eq!(config.input.source, SignalSource::Raw);
        assert_eq!(config.detector.step_mult, 0.25);
        assert_eq!(config.detector.window_mult, 1.0);
        assert_eq!(config.filter.high_hz, 15.0);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("[filter]\nlow_hz = 20.0\n").unwrap_err(),
            EcgError::Config(_)
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("[input]\nsample_rate = \"fast\"\n").unwrap_err(),
            EcgError::ConfigParse(_)
        ));
    }

    #[test]
    fn test_zero_column_rejected() {
        let mut config = AnalysisConfig::default();
        config.input.ecg_column = 0;
        assert!(config.validate().is_err());
    }
}
