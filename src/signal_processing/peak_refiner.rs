use crate::constants::TIME_EPSILON;
use crate::peaks::PeakSet;

/// Remove double detections until the set is stable.
///
/// Runs [`refine_once`] repeatedly until a sweep removes nothing. Each
/// sweep uses a single threshold derived from the set as it stood when the
/// sweep started; the outer loop only makes the result a fixed point, so
/// refining an already refined set returns it unchanged.
pub fn refine_peaks(mut peaks: PeakSet) -> PeakSet {
    let mut sweeps = 0;
    loop {
        sweeps += 1;
        if refine_once(&mut peaks) == 0 {
            break;
        }
    }
    log::debug!("Refined to {} peaks in {} sweeps", peaks.len(), sweeps);
    peaks
}

/// One sweep of the spacing filter. Returns the number of peaks removed.
///
/// With `lower = mean(intervals) - std(intervals)` fixed up front, a cursor
/// walks the set from the second peak. When the gap to the previous peak
/// is below `lower`, the lower-amplitude peak of the pair is dropped and
/// the same cursor position is checked again against its new predecessor,
/// so runs of three or more close detections collapse to one.
pub fn refine_once(peaks: &mut PeakSet) -> usize {
    if peaks.len() < 2 {
        return 0;
    }

    let lower = spacing_lower_bound(&peaks.intervals());
    let list = peaks.peaks_mut();
    let before = list.len();

    let mut i = 1;
    while i < list.len() {
        let gap = list[i].time - list[i - 1].time;
        if gap < lower - TIME_EPSILON {
            let drop = if list[i].amplitude > list[i - 1].amplitude {
                i - 1
            } else {
                i
            };
            log::trace!(
                "Dropping peak at {:.4}s ({:.4}s from neighbor, bound {:.4}s)",
                list[drop].time,
                gap,
                lower
            );
            list.remove(drop);
        } else {
            i += 1;
        }
    }

    before - list.len()
}

/// `mean - std` of the intervals, with the population standard deviation.
fn spacing_lower_bound(intervals: &[f64]) -> f64 {
    let n = intervals.len() as f64;
    let mean = intervals.iter().sum::<f64>() / n;
    let variance = intervals.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    mean - variance.sqrt()
}
