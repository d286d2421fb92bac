use crate::peaks::PeakSet;

/// Agreement between detected peaks and known beat times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakMatch {
    /// True beats with a detected peak within tolerance
    pub matched: usize,
    /// True beats with no detected peak within tolerance
    pub missed: usize,
    /// Detected peaks not assigned to any true beat
    pub spurious: usize,
    /// Largest timing error among matched beats, seconds
    pub max_error: f64,
    pub mean_abs_error: f64,
}

impl PeakMatch {
    pub fn sensitivity(&self) -> f64 {
        let total = self.matched + self.missed;
        if total == 0 {
            return 0.0;
        }
        self.matched as f64 / total as f64
    }
}

/// Greedily pair each true beat with the nearest unused detected peak.
pub fn match_peaks(detected: &PeakSet, truth: &[f64], tolerance: f64) -> PeakMatch {
    let times = detected.times();
    let mut used = vec![false; times.len()];
    let mut result = PeakMatch::default();
    let mut error_sum = 0.0;

    for &beat in truth {
        let nearest = times
            .iter()
            .enumerate()
            .filter(|&(i, _)| !used[i])
            .map(|(i, &t)| (i, (t - beat).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((i, err)) if err <= tolerance => {
                used[i] = true;
                result.matched += 1;
                result.max_error = result.max_error.max(err);
                error_sum += err;
            }
            _ => result.missed += 1,
        }
    }

    result.spurious = used.iter().filter(|&&u| !u).count();
    if result.matched > 0 {
        result.mean_abs_error = error_sum / result.matched as f64;
    }
    result
}
