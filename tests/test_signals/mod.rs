#![allow(dead_code)]

use rpeak::simulation::{EcgModel, NoiseConfig, apply_noise, spike_train, to_tsv, trigger_channel};
use rpeak::{Recording, RecordingTable, parse_table};

pub const SAMPLE_RATE: u32 = 1000;

pub const PREAMBLE: &[&str] = &[
    "Interval=\t0.001 s",
    "ExcelDateTime=\t4.5e4\t10/19/2026 09:12:44",
    "ChannelTitle=\tECG\tTrigger",
];

/// Unit spikes at the given sample indices.
pub fn spike_recording(len: usize, positions: &[usize]) -> Recording {
    Recording::from_amplitude(spike_train(len, positions, 1.0), SAMPLE_RATE)
}

/// Synthetic ECG (and optional trigger) rendered to TSV and ingested back.
pub fn ecg_table(
    model: &EcgModel,
    duration_secs: f64,
    noise: &NoiseConfig,
    trigger: Option<&[(f64, usize)]>,
) -> RecordingTable {
    let clean = model.generate(duration_secs, SAMPLE_RATE);
    let mut columns = vec![apply_noise(&clean, noise, SAMPLE_RATE)];
    if let Some(parts) = trigger {
        columns.push(trigger_channel(parts));
    }
    let text = to_tsv(PREAMBLE, &columns, SAMPLE_RATE);
    parse_table(&text, SAMPLE_RATE).expect("synthetic recording should parse")
}

/// Index of the closest true beat and the distance to it.
pub fn nearest_beat(beats: &[f64], time: f64) -> (usize, f64) {
    beats
        .iter()
        .enumerate()
        .map(|(i, &b)| (i, (b - time).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((usize::MAX, f64::INFINITY))
}
