use serde::Serialize;

/// A detected peak: one `(time, amplitude)` sample of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub time: f64,
    pub amplitude: f64,
}

impl Peak {
    pub fn new(time: f64, amplitude: f64) -> Self {
        Self { time, amplitude }
    }
}

/// Time-ordered peaks with unique times.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PeakSet {
    peaks: Vec<Peak>,
}

impl PeakSet {
    /// Sort candidates by time and keep the first occurrence of each time.
    ///
    /// The sort is stable, so among duplicates the one that arrived first
    /// survives.
    pub fn from_candidates(mut candidates: Vec<Peak>) -> Self {
        candidates.sort_by(|a, b| a.time.total_cmp(&b.time));
        candidates.dedup_by(|later, earlier| later.time == earlier.time);
        Self { peaks: candidates }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    pub fn into_vec(self) -> Vec<Peak> {
        self.peaks
    }

    pub fn times(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.time).collect()
    }

    pub fn amplitudes(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.amplitude).collect()
    }

    /// Consecutive time differences (R-R intervals).
    pub fn intervals(&self) -> Vec<f64> {
        self.peaks
            .windows(2)
            .map(|w| w[1].time - w[0].time)
            .collect()
    }

    /// Peaks with `start <= time <= end`.
    pub fn within(&self, start: f64, end: f64) -> PeakSet {
        Self {
            peaks: self
                .peaks
                .iter()
                .filter(|p| p.time >= start && p.time <= end)
                .copied()
                .collect(),
        }
    }

    /// Insert a peak in time order. A peak already at that time is replaced.
    pub fn insert(&mut self, peak: Peak) {
        match self
            .peaks
            .binary_search_by(|p| p.time.total_cmp(&peak.time))
        {
            Ok(idx) => self.peaks[idx] = peak,
            Err(idx) => self.peaks.insert(idx, peak),
        }
    }

    /// Remove and return the peak closest in time to `time`.
    pub fn remove_nearest(&mut self, time: f64) -> Option<Peak> {
        let idx = self
            .peaks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.time - time).abs().total_cmp(&(b.time - time).abs()))
            .map(|(i, _)| i)?;
        Some(self.peaks.remove(idx))
    }

    pub(crate) fn peaks_mut(&mut self) -> &mut Vec<Peak> {
        &mut self.peaks
    }
}

impl<'a> IntoIterator for &'a PeakSet {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}
