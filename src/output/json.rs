use super::{ChunkReport, Formatter};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &ChunkReport) -> String {
        // Non-finite quality (identical signals) serializes as null.
        serde_json::to_string(report).unwrap_or_else(|e| {
            log::error!("Failed to serialize report: {}", e);
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_report;

    #[test]
    fn test_json_fields() {
        let line = JsonFormatter.format(&sample_report(true));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["file"], "rec01.txt");
        assert_eq!(value["peaks"], 80);
        assert_eq!(value["intervals"]["count"], 79);
        assert!(value["quality_db"].as_f64().is_some());
    }

    #[test]
    fn test_json_infinite_quality_is_null() {
        let mut report = sample_report(false);
        report.quality_db = Some(f64::INFINITY);
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format(&report)).unwrap();
        assert!(value["quality_db"].is_null());
        assert!(value["intervals"].is_null());
    }
}
