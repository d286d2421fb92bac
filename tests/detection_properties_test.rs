mod test_signals;

use rpeak::signal_processing::{
    bandpass_filter, detect_peaks, refine_peaks, segment_default, signal_to_noise,
};
use rpeak::simulation::{EcgModel, NoiseConfig, apply_noise, trigger_channel};
use rpeak::{Peak, PeakSet, Recording};
use test_signals::{SAMPLE_RATE, spike_recording};

fn noisy_ecg(seconds: f64, seed: u64) -> Recording {
    let clean = EcgModel::default()
        .with_heart_rate(75.0)
        .generate(seconds, SAMPLE_RATE);
    let noise = NoiseConfig::default()
        .with_seed(seed)
        .with_awgn(6.0)
        .with_impulse(0.5, 0.8, 3);
    Recording::from_amplitude(apply_noise(&clean, &noise, SAMPLE_RATE), SAMPLE_RATE)
}

#[test]
fn test_five_spikes_exactly_found() {
    let recording = spike_recording(10_000, &[1000, 3000, 5000, 7000, 9000]);
    let peaks = detect_peaks(&recording, SAMPLE_RATE, 1.0, 0.5);
    assert_eq!(peaks.times(), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
}

#[test]
fn test_close_pair_collapses_to_higher() {
    let mut amplitude = spike_recording(10_000, &[1000, 5000, 7000, 9000])
        .amplitude()
        .to_vec();
    amplitude[3000] = 1.2;
    amplitude[3005] = 0.9;
    let recording = Recording::from_amplitude(amplitude, SAMPLE_RATE);

    let peaks = detect_peaks(&recording, SAMPLE_RATE, 1.0, 0.5);
    assert_eq!(peaks.times(), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    assert_eq!(peaks.as_slice()[1].amplitude, 1.2);
}

#[test]
fn test_refine_is_idempotent_on_noisy_detections() {
    for seed in 0..5 {
        let recording = noisy_ecg(30.0, seed);
        let peaks = detect_peaks(&recording, SAMPLE_RATE, 1.0, 0.5);
        let again = refine_peaks(peaks.clone());
        assert_eq!(again, peaks, "seed {}", seed);
    }
}

#[test]
fn test_refine_idempotent_on_arbitrary_sets() {
    let times = [0.1, 0.15, 0.9, 1.0, 1.02, 2.2, 2.21, 2.22, 3.5, 3.6, 5.0];
    let peaks = PeakSet::from_candidates(
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Peak::new(t, 1.0 + (i % 3) as f64 * 0.1))
            .collect(),
    );
    let once = refine_peaks(peaks);
    let twice = refine_peaks(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_detected_times_strictly_increasing() {
    for seed in 0..5 {
        let peaks = detect_peaks(&noisy_ecg(20.0, seed), SAMPLE_RATE, 1.0, 0.5);
        assert!(!peaks.is_empty());
        for pair in peaks.as_slice().windows(2) {
            assert!(pair[0].time < pair[1].time, "seed {}", seed);
        }
    }
}

#[test]
fn test_filter_keeps_length_and_time_axis() {
    for seconds in [0.001, 1.0, 7.3] {
        let recording = noisy_ecg(seconds, 4);
        let filtered = bandpass_filter(&recording, SAMPLE_RATE).unwrap();
        assert_eq!(filtered.len(), recording.len());
        assert_eq!(filtered.time(), recording.time());
    }

    let empty = bandpass_filter(&Recording::default(), SAMPLE_RATE).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_segments_cover_trigger_without_overlap() {
    let channel = trigger_channel(&[(0.0, 10_000), (100.0, 6_000), (0.0, 10_000)]);
    let segments = segment_default(&channel, SAMPLE_RATE);

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].start, 0);
    assert_eq!(segments[2].end, 26_000);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(segments.iter().map(|s| s.len()).sum::<usize>(), 26_000);
}

#[test]
fn test_quality_of_identical_signals_is_infinite() {
    let recording = noisy_ecg(2.0, 1);
    let q = signal_to_noise(&recording, &recording).unwrap();
    assert!(q.is_infinite() && q > 0.0);

    let filtered = bandpass_filter(&recording, SAMPLE_RATE).unwrap();
    assert!(signal_to_noise(&filtered, &recording).unwrap().is_finite());
}

#[test]
fn test_empty_recording_yields_no_peaks() {
    let peaks = detect_peaks(&Recording::default(), SAMPLE_RATE, 1.0, 0.5);
    assert!(peaks.is_empty());
    assert!(refine_peaks(PeakSet::default()).is_empty());
}
