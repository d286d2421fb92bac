use anyhow::{Context, Result};
use clap::Parser;
use rpeak::simulation::{EcgModel, NoiseConfig, apply_noise, to_tsv, trigger_channel};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_recording")]
#[command(about = "Generate synthetic tab-separated ECG recordings for R-peak testing")]
struct Args {
    /// Output file
    output: PathBuf,

    /// TOML file with [model] and [noise] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 1000)]
    sample_rate: u32,

    /// Heart rate in beats per minute (CLI override)
    #[arg(long)]
    heart_rate: Option<f64>,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f64>,

    /// Baseline wander amplitude at 0.2 Hz (CLI override)
    #[arg(long)]
    wander: Option<f64>,

    /// 50 Hz mains amplitude (CLI override)
    #[arg(long)]
    mains: Option<f64>,

    /// Trigger column as level:seconds parts, e.g. "0:10,100:6,0:10"
    #[arg(short, long)]
    trigger: Option<String>,

    /// Seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the true beat times next to the output as JSON
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    model: EcgModel,
    noise: NoiseConfig,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    duration: f64,
    heart_rate_bpm: f64,
    seed: Option<u64>,
    beats: Vec<f64>,
}

fn parse_trigger(s: &str, sample_rate: u32) -> Result<Vec<(f64, usize)>> {
    s.split(',')
        .map(|part| -> Result<(f64, usize)> {
            let (level, secs) = part
                .trim()
                .split_once(':')
                .context("Invalid trigger part. Use 'level:seconds'")?;
            let level: f64 = level.parse().context("Invalid trigger level")?;
            let secs: f64 = secs.parse().context("Invalid trigger duration")?;
            if secs < 0.0 {
                anyhow::bail!("Negative trigger duration {}", secs);
            }
            Ok((level, (secs * sample_rate as f64).round() as usize))
        })
        .collect()
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(toml: &TomlConfig, args: &Args) -> NoiseConfig {
    let mut config = toml.noise.clone();

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(snr) = args.snr {
        config = config.with_awgn(snr);
    }
    if let Some(amplitude) = args.wander {
        config = config.with_wander(amplitude, 0.2);
    }
    if let Some(amplitude) = args.mains {
        config = config.with_mains(amplitude, 50.0);
    }

    config
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let mut model = toml_config.model.clone();
    if let Some(bpm) = args.heart_rate {
        model = model.with_heart_rate(bpm);
    }
    if !(model.heart_rate_bpm > 0.0) {
        anyhow::bail!("Heart rate must be positive, got {}", model.heart_rate_bpm);
    }

    let noise_config = build_noise_config(&toml_config, &args);
    let clean = model.generate(args.duration, args.sample_rate);
    let ecg = apply_noise(&clean, &noise_config, args.sample_rate);

    let mut columns = vec![ecg];
    let mut preamble = vec![
        format!("Interval=\t{} s", 1.0 / args.sample_rate as f64),
        "ChannelTitle=\tECG".to_string(),
    ];

    if let Some(ref parts) = args.trigger {
        let mut trigger = trigger_channel(&parse_trigger(parts, args.sample_rate)?);
        trigger.resize(clean.len(), 0.0);
        columns.push(trigger);
        preamble[1].push_str("\tTrigger");
    }

    let preamble: Vec<&str> = preamble.iter().map(String::as_str).collect();
    fs::write(&args.output, to_tsv(&preamble, &columns, args.sample_rate))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let beats = model.beat_times(args.duration);
    if args.manifest {
        let manifest = Manifest {
            sample_rate: args.sample_rate,
            duration: args.duration,
            heart_rate_bpm: model.heart_rate_bpm,
            seed: noise_config.seed,
            beats: beats.clone(),
        };
        let manifest_path = args.output.with_extension("json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Wrote {} samples ({} beats) to {}",
        clean.len(),
        beats.len(),
        args.output.display()
    );
    Ok(())
}
