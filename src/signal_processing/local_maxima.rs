/// Indices of local maxima in `samples`
///
/// A local maximum is a sample strictly greater than its left neighbor,
/// followed by an optional run of equal samples and then a strictly smaller
/// sample. For a flat top the middle sample is reported (rounded toward the
/// left). The first and last samples are never maxima.
pub fn local_maxima(samples: &[f64]) -> Vec<usize> {
    let n = samples.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    let i_max = n - 1;
    while i < i_max {
        if samples[i - 1] < samples[i] {
            let mut ahead = i + 1;
            while ahead < i_max && samples[ahead] == samples[i] {
                ahead += 1;
            }
            if samples[ahead] < samples[i] {
                let left = i;
                let right = ahead - 1;
                maxima.push((left + right) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Local maxima whose amplitude is at least `height`.
pub fn peaks_above(samples: &[f64], height: f64) -> Vec<usize> {
    local_maxima(samples)
        .into_iter()
        .filter(|&i| samples[i] >= height)
        .collect()
}
