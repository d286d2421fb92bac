//! Tuned constants for the R-peak pipeline
//!
//! These values have no derivation beyond long use on surface ECG
//! recordings. They are the defaults of the corresponding config fields
//! and can be overridden there.

/// Lower edge of the FFT passband in Hz.
pub const DEFAULT_PASSBAND_LOW_HZ: f64 = 0.5;

/// Upper edge of the FFT passband in Hz.
pub const DEFAULT_PASSBAND_HIGH_HZ: f64 = 15.0;

/// Detection window length as a multiple of the sample rate (1 s).
pub const DEFAULT_WINDOW_MULT: f64 = 1.0;

/// Detection window step as a multiple of the sample rate (0.5 s).
pub const DEFAULT_STEP_MULT: f64 = 0.5;

/// Coarse pass height, as a fraction of the window maximum.
pub const DEFAULT_COARSE_FRACTION: f64 = 0.8;

/// Fine pass height, as a fraction of the mean coarse peak amplitude.
pub const DEFAULT_FINE_FRACTION: f64 = 0.8;

/// Trigger threshold as a fraction of the trigger channel maximum.
pub const DEFAULT_TRIGGER_FRACTION: f64 = 0.9;

/// Minimum segment length as a multiple of the sample rate (5 s).
pub const DEFAULT_MIN_SEGMENT_MULT: f64 = 5.0;

/// Slack applied to peak spacing comparisons in seconds.
/// Evenly spaced peak times differ by a few ULPs after `i / fs`; without
/// this such pairs would register as closer than the mean spacing.
pub const TIME_EPSILON: f64 = 1e-9;

/// R-R interval histogram bin width in seconds.
pub const RR_HISTOGRAM_BIN_WIDTH: f64 = 0.1;

/// Upper edge of the R-R interval histogram in seconds.
pub const RR_HISTOGRAM_UPPER: f64 = 2.0;

/// Normal resting R-R interval range in seconds (100 to 50 bpm).
pub const NORMAL_RR_RANGE: (f64, f64) = (0.6, 1.2);
