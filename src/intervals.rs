//! R-R interval statistics over a peak set.

use rolling_stats::Stats;
use serde::Serialize;

use crate::constants::{NORMAL_RR_RANGE, RR_HISTOGRAM_BIN_WIDTH, RR_HISTOGRAM_UPPER};
use crate::peaks::PeakSet;

/// Summary of the consecutive peak intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Smallest interval in seconds
    pub min: f64,
    /// Time of the peak that opens the smallest interval
    pub min_at: f64,
    /// Largest interval in seconds
    pub max: f64,
    /// Time of the peak that opens the largest interval
    pub max_at: f64,
    /// Mean heart rate in beats per minute
    pub heart_rate_bpm: f64,
    /// Share of intervals inside the normal resting range
    pub normal_fraction: f64,
}

impl IntervalSummary {
    /// `None` when there are fewer than two peaks.
    pub fn from_peaks(peaks: &PeakSet) -> Option<Self> {
        let intervals = peaks.intervals();
        if intervals.is_empty() {
            return None;
        }

        let mut stats: Stats<f64> = Stats::new();
        let mut min_idx = 0;
        let mut max_idx = 0;
        for (i, &d) in intervals.iter().enumerate() {
            stats.update(d);
            if d < intervals[min_idx] {
                min_idx = i;
            }
            if d > intervals[max_idx] {
                max_idx = i;
            }
        }

        let (lo, hi) = NORMAL_RR_RANGE;
        let normal = intervals.iter().filter(|&&d| d >= lo && d <= hi).count();
        let times = peaks.as_slice();

        Some(Self {
            count: intervals.len(),
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: intervals[min_idx],
            min_at: times[min_idx].time,
            max: intervals[max_idx],
            max_at: times[max_idx].time,
            heart_rate_bpm: 60.0 / stats.mean,
            normal_fraction: normal as f64 / intervals.len() as f64,
        })
    }
}

/// One histogram bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// R-R histogram with the default 0.1 s bins over `[0, 2)`.
pub fn rr_histogram(intervals: &[f64]) -> Vec<HistogramBin> {
    histogram(intervals, RR_HISTOGRAM_BIN_WIDTH, RR_HISTOGRAM_UPPER)
}

/// Histogram with edges `0, w, 2w, ...` strictly below `upper`.
///
/// Values beyond the last edge are not counted.
pub fn histogram(values: &[f64], bin_width: f64, upper: f64) -> Vec<HistogramBin> {
    if !(bin_width > 0.0) || !(upper > 0.0) {
        return Vec::new();
    }
    let edges: Vec<f64> = (0..)
        .map(|k| k as f64 * bin_width)
        .take_while(|&e| e < upper - bin_width * 1e-9)
        .collect();
    if edges.len() < 2 {
        return Vec::new();
    }

    let mut bins: Vec<HistogramBin> = edges
        .windows(2)
        .map(|w| HistogramBin {
            lower: w[0],
            upper: w[1],
            count: 0,
        })
        .collect();
    let last_edge = edges[edges.len() - 1];

    for &v in values {
        if v < 0.0 || v > last_edge {
            continue;
        }
        let idx = ((v / bin_width) as usize).min(bins.len() - 1);
        // Guard against the division landing one bin off at an edge.
        let idx = if v < bins[idx].lower && idx > 0 {
            idx - 1
        } else if v >= bins[idx].upper && idx + 1 < bins.len() {
            idx + 1
        } else {
            idx
        };
        bins[idx].count += 1;
    }
    bins
}
