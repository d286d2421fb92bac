use super::{ChunkReport, Formatter, minutes_seconds};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &ChunkReport) -> String {
        let quality = report
            .quality_db
            .map_or("N/A".to_string(), |q| format!("{:.1} dB", q));
        let head = format!(
            "{} [{}] {} - {}: {} peaks, SNR {}",
            report.file,
            report.label,
            minutes_seconds(report.start_secs),
            minutes_seconds(report.end_secs),
            report.peaks,
            quality
        );

        let Some(ref rr) = report.intervals else {
            return head;
        };

        if self.verbose {
            format!(
                "{}, RR {:.3}s ± {:.3}s (min {:.3}s @ {:.2}s, max {:.3}s @ {:.2}s), {:.1} bpm, {:.0}% normal",
                head,
                rr.mean,
                rr.std_dev,
                rr.min,
                rr.min_at,
                rr.max,
                rr.max_at,
                rr.heart_rate_bpm,
                rr.normal_fraction * 100.0
            )
        } else {
            format!(
                "{}, RR avg {:.3}s min {:.3}s max {:.3}s",
                head, rr.mean, rr.min, rr.max
            )
        }
    }
}
