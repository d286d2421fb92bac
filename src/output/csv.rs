use super::{ChunkReport, Formatter};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &ChunkReport) -> String {
        let quality = report
            .quality_db
            .map_or(String::new(), |q| format!("{:.2}", q));
        let (mean, min, max, bpm) = report.intervals.as_ref().map_or(
            (String::new(), String::new(), String::new(), String::new()),
            |rr| {
                (
                    format!("{:.4}", rr.mean),
                    format!("{:.4}", rr.min),
                    format!("{:.4}", rr.max),
                    format!("{:.1}", rr.heart_rate_bpm),
                )
            },
        );
        format!(
            "{},{},{:.3},{:.3},{},{},{},{},{},{},{}",
            report.file,
            report.label,
            report.start_secs,
            report.end_secs,
            report.samples,
            report.peaks,
            quality,
            mean,
            min,
            max,
            bpm
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("file,label,start_s,end_s,samples,peaks,snr_db,rr_mean,rr_min,rr_max,bpm")
    }
}
