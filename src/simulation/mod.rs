mod measure;
mod noise;
mod signal;
mod tsv;

pub use measure::{PeakMatch, match_peaks};
pub use noise::{
    AdditiveNoiseConfig, BaselineWanderConfig, ImpulseNoiseConfig, MainsConfig, NoiseConfig,
    apply_noise, signal_power,
};
pub use signal::{EcgModel, spike_train, trigger_channel};
pub use tsv::to_tsv;
