pub mod bandpass;
pub mod local_maxima;
pub mod peak_detector;
pub mod peak_refiner;
pub mod quality;
pub mod segmenter;

pub use bandpass::FftBandpass;
pub use local_maxima::{local_maxima, peaks_above};
pub use peak_detector::{PeakDetector, detect_peaks, detect_window};
pub use peak_refiner::{refine_once, refine_peaks};
pub use quality::signal_to_noise;
pub use segmenter::{PulseSegmenter, Segment, segment, segment_default};

use crate::config::FilterConfig;
use crate::error::Result;
use crate::recording::Recording;

/// Bandpass a recording with the default 0.5-15 Hz passband.
pub fn bandpass_filter(recording: &Recording, sample_rate: u32) -> Result<Recording> {
    let filter = FftBandpass::from_config(&FilterConfig::default(), sample_rate)?;
    Ok(filter.apply(recording))
}
