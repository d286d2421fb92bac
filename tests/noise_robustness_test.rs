mod test_signals;

use rpeak::config::AnalysisConfig;
use rpeak::simulation::{EcgModel, NoiseConfig, match_peaks};
use rpeak::EcgProcessor;
use test_signals::{ecg_table, nearest_beat};

const DURATION_SECS: f64 = 20.0;

fn detect(noise: &NoiseConfig) -> (rpeak::PeakSet, Vec<f64>) {
    let model = EcgModel::default();
    let table = ecg_table(&model, DURATION_SECS, noise, None);
    let processor = EcgProcessor::new(&AnalysisConfig::default()).unwrap();
    let analysis = processor.analyze(&table).unwrap();
    (analysis.peaks, model.beat_times(DURATION_SECS))
}

#[test]
fn test_clean_ecg_every_beat_found() {
    let (peaks, beats) = detect(&NoiseConfig::default());
    assert_eq!(beats.len(), 20);

    let m = match_peaks(&peaks, &beats, 0.020);
    assert_eq!(m.matched, 20, "{:?}", peaks.times());
    assert_eq!(m.spurious, 0);
}

#[test]
fn test_wander_and_mains_removed_by_filter() {
    // 0.2 Hz and 50 Hz fall exactly on FFT bins of a 20 s recording.
    let noise = NoiseConfig::default()
        .with_wander(0.5, 0.2)
        .with_mains(0.2, 50.0);
    let (peaks, beats) = detect(&noise);

    let m = match_peaks(&peaks, &beats, 0.020);
    assert_eq!(m.matched, 20, "{:?}", peaks.times());
    assert_eq!(m.spurious, 0);
    assert!(m.max_error < 0.005, "max error {}", m.max_error);
}

#[test]
fn test_awgn_peaks_stay_on_beats() {
    for seed in [1, 2, 3] {
        let noise = NoiseConfig::default().with_seed(seed).with_awgn(10.0);
        let (peaks, beats) = detect(&noise);

        for &t in peaks.times().iter() {
            let (_, err) = nearest_beat(&beats, t);
            assert!(
                err < 0.015,
                "seed {}: peak at {:.3}s is {:.1} ms from any beat",
                seed,
                t,
                err * 1000.0
            );
        }

        // Sample-level jitter lets the spacing filter drop some beats;
        // it must never drop most of them.
        let m = match_peaks(&peaks, &beats, 0.015);
        assert!(
            m.matched >= 12,
            "seed {}: only {} of {} beats found",
            seed,
            m.matched,
            beats.len()
        );
    }
}

#[test]
fn test_awgn_quality_lower_than_clean() {
    let model = EcgModel::default();
    let processor = EcgProcessor::new(&AnalysisConfig::default()).unwrap();

    let clean = ecg_table(&model, DURATION_SECS, &NoiseConfig::default(), None);
    let noisy = ecg_table(
        &model,
        DURATION_SECS,
        &NoiseConfig::default().with_seed(9).with_awgn(0.0),
        None,
    );

    let q_clean = processor.analyze(&clean).unwrap().quality_db.unwrap();
    let q_noisy = processor.analyze(&noisy).unwrap().quality_db.unwrap();
    assert!(q_noisy < q_clean, "noisy {} dB vs clean {} dB", q_noisy, q_clean);
}
