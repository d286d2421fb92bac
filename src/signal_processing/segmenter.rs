use std::ops::Range;

use serde::Serialize;

use crate::config::SegmenterConfig;
use crate::constants::{DEFAULT_MIN_SEGMENT_MULT, DEFAULT_TRIGGER_FRACTION};

/// Half-open `[start, end)` index range into a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Trigger-channel segmenter
///
/// Tracks an "in pulse" state against a level of `threshold_fraction` times
/// the channel maximum. The signal rising above the level while out of
/// pulse, or falling below it while in pulse, is an edge. At each edge the
/// stretch since the previous edge becomes a segment if it is longer than
/// the minimum length; shorter stretches are dropped.
/// The last sample closes a trailing segment unless it is itself an edge.
pub struct PulseSegmenter {
    min_length: usize,
    threshold_fraction: f64,
}

impl PulseSegmenter {
    pub fn new(config: &SegmenterConfig, sample_rate: u32) -> Self {
        Self {
            min_length: (sample_rate as f64 * config.min_length_mult) as usize,
            threshold_fraction: config.threshold_fraction,
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn segment(&self, channel: &[f64]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let Some(max) = channel.iter().copied().reduce(f64::max) else {
            return segments;
        };
        let level = self.threshold_fraction * max;
        let last = channel.len() - 1;

        let mut in_pulse = false;
        let mut start = 0;
        for (i, &value) in channel.iter().enumerate() {
            let edge = if !in_pulse && value > level {
                Some(true)
            } else if in_pulse && value < level {
                Some(false)
            } else {
                None
            };

            match edge {
                Some(next_state) => {
                    if i - start > self.min_length {
                        segments.push(Segment::new(start, i));
                    } else {
                        log::trace!("Ignoring {}-sample stretch at {}", i - start, start);
                    }
                    start = i;
                    in_pulse = next_state;
                }
                None if i == last => segments.push(Segment::new(start, channel.len())),
                None => {}
            }
        }

        log::debug!(
            "{} segments from {} trigger samples (level {:.3}, min length {})",
            segments.len(),
            channel.len(),
            level,
            self.min_length
        );
        segments
    }
}

impl Default for PulseSegmenter {
    fn default() -> Self {
        Self::new(&SegmenterConfig::default(), 1000)
    }
}

/// Segment a trigger channel with the default trigger level.
pub fn segment(channel: &[f64], sample_rate: u32, min_length_mult: f64) -> Vec<Segment> {
    let config = SegmenterConfig {
        min_length_mult,
        threshold_fraction: DEFAULT_TRIGGER_FRACTION,
    };
    PulseSegmenter::new(&config, sample_rate).segment(channel)
}

/// Segment with every default (five-second minimum).
pub fn segment_default(channel: &[f64], sample_rate: u32) -> Vec<Segment> {
    segment(channel, sample_rate, DEFAULT_MIN_SEGMENT_MULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_train(parts: &[(f64, usize)]) -> Vec<f64> {
        parts
            .iter()
            .flat_map(|&(v, n)| std::iter::repeat_n(v, n))
            .collect()
    }

    #[test]
    fn test_three_stretches() {
        let channel = pulse_train(&[(0.0, 10_000), (100.0, 6_000), (0.0, 10_000)]);
        let segments = segment_default(&channel, 1000);
        assert_eq!(
            segments,
            vec![
                Segment::new(0, 10_000),
                Segment::new(10_000, 16_000),
                Segment::new(16_000, 26_000),
            ]
        );
    }

    #[test]
    fn test_short_glitch_dropped() {
        let channel = pulse_train(&[(0.0, 8_000), (1.0, 50), (0.0, 8_000)]);
        let segments = segment_default(&channel, 1000);
        // Rising edge at 8000 closes [0, 8000); the falling edge 50 samples
        // later is too soon, so the trailing stretch starts at 8050.
        assert_eq!(
            segments,
            vec![Segment::new(0, 8_000), Segment::new(8_050, 16_050)]
        );
    }

    #[test]
    fn test_flat_channel_is_one_segment() {
        let channel = vec![0.0; 100];
        assert_eq!(segment(&channel, 10, 5.0), vec![Segment::new(0, 100)]);
    }

    #[test]
    fn test_edge_on_last_sample_closes_nothing() {
        let mut channel = vec![0.0; 100];
        channel[99] = 1.0;
        assert_eq!(segment(&channel, 10, 5.0), vec![Segment::new(0, 99)]);
    }

    #[test]
    fn test_empty_channel() {
        assert!(segment_default(&[], 1000).is_empty());
    }

    #[test]
    fn test_segments_ordered_and_disjoint() {
        let channel = pulse_train(&[
            (0.0, 300),
            (5.0, 200),
            (0.0, 20),
            (5.0, 400),
            (0.0, 250),
        ]);
        let segments = segment(&channel, 100, 1.0);
        assert!(!segments.is_empty());
        for pair in segments.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for s in &segments {
            assert!(!s.is_empty());
            assert!(s.end <= channel.len());
        }
    }
}
