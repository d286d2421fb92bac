use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use rpeak::config::{AnalysisConfig, SignalSource};
use rpeak::output::{ChunkReport, Formatter, OutputFormat, create_formatter};
use rpeak::{EcgProcessor, read_table};

#[derive(Parser, Debug)]
#[command(name = "rpeak")]
#[command(about = "Detect R-peaks in tab-separated ECG recordings", long_about = None)]
struct Args {
    /// Recording files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sample rate in Hz
    #[arg(short = 'r', long)]
    sample_rate: Option<u32>,

    /// ECG channel (1-based, time column excluded)
    #[arg(short = 'c', long)]
    ecg_column: Option<usize>,

    /// Trigger channel used to split the recording into segments
    #[arg(short = 'p', long)]
    pulse_column: Option<usize>,

    /// Signal peaks are detected on
    #[arg(long, value_enum)]
    source: Option<SignalSource>,

    /// Detection window length in seconds
    #[arg(long)]
    window_mult: Option<f64>,

    /// Detection window step in seconds
    #[arg(long)]
    step_mult: Option<f64>,

    /// Minimum segment length in seconds
    #[arg(long)]
    min_segment_mult: Option<f64>,

    /// Start of the analyzed range in seconds (ignored with --pulse-column)
    #[arg(long)]
    start: Option<f64>,

    /// End of the analyzed range in seconds (ignored with --pulse-column)
    #[arg(long)]
    end: Option<f64>,
}

impl Args {
    fn build_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match self.config {
            Some(ref path) => AnalysisConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if let Some(rate) = self.sample_rate {
            config.input.sample_rate = rate;
        }
        if let Some(column) = self.ecg_column {
            config.input.ecg_column = column;
        }
        if self.pulse_column.is_some() {
            config.input.pulse_column = self.pulse_column;
        }
        if let Some(source) = self.source {
            config.input.source = source;
        }
        if let Some(mult) = self.window_mult {
            config.detector.window_mult = mult;
        }
        if let Some(mult) = self.step_mult {
            config.detector.step_mult = mult;
        }
        if let Some(mult) = self.min_segment_mult {
            config.segmenter.min_length_mult = mult;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = args.build_config()?;
    let processor = EcgProcessor::new(&config)?;
    let formatter = create_formatter(args.format, args.verbose > 0);

    eprintln!(
        "Sample rate: {} Hz, ECG column {}, source {:?}",
        config.input.sample_rate, config.input.ecg_column, config.input.source
    );

    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut failures = 0;
    for path in &args.files {
        let filename = path.display().to_string();
        match analyze_file(path, &processor, &args) {
            Ok(reports) => {
                for report in &reports {
                    println!("{}", formatter.format(report));
                }
            }
            Err(err) => {
                failures += 1;
                print_error(&*formatter, args.format, &filename, &err);
            }
        }
    }

    if failures > 0 {
        log::warn!("{} of {} files failed", failures, args.files.len());
    }

    Ok(())
}

fn analyze_file(
    path: &Path,
    processor: &EcgProcessor,
    args: &Args,
) -> anyhow::Result<Vec<ChunkReport>> {
    let filename = path.display().to_string();
    let config = processor.config();

    let table = read_table(path, config.input.sample_rate)
        .with_context(|| format!("reading {}", filename))?;
    let analysis = processor.analyze(&table)?;

    if let Some(count) = analysis.segments.as_ref().map(|s| s.len()) {
        if count == 0 {
            log::warn!("{}: trigger channel produced no segments", filename);
        }
        return (0..count)
            .map(|i| -> anyhow::Result<ChunkReport> {
                let chunk = analysis.chunk(i)?;
                let label = format!("segment {}/{}", i + 1, count);
                Ok(ChunkReport::from_chunk(&filename, &label, &chunk)?)
            })
            .collect();
    }

    let chunk = match (args.start, args.end) {
        (None, None) => analysis.whole()?,
        (start, end) => {
            let start = start.unwrap_or(0.0);
            let end = end.unwrap_or(f64::INFINITY);
            analysis.time_range(start, end)?
        }
    };
    let label = if args.start.is_some() || args.end.is_some() {
        "range"
    } else {
        "whole"
    };

    Ok(vec![ChunkReport::from_chunk(&filename, label, &chunk)?])
}

fn print_error(
    formatter: &dyn Formatter,
    format: OutputFormat,
    filename: &str,
    err: &anyhow::Error,
) {
    log::error!("{}: {:#}", filename, err);
    match format {
        OutputFormat::Text => println!("{} ERROR: {:#}", filename, err),
        OutputFormat::Csv => {
            let columns = formatter.header().map_or(1, |h| h.split(',').count());
            println!("{},ERROR{}", filename, ",".repeat(columns.saturating_sub(2)));
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "file": filename, "error": format!("{:#}", err) })
        ),
    }
}
