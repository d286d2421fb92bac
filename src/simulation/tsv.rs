use std::fmt::Write;

/// Render channels as a tab-separated export.
///
/// The first column carries the sample time in seconds; the reader
/// recomputes it from the sample rate. Preamble lines must contain
/// something other than digits, whitespace, `.` and `-`, or they are taken
/// as data. Shorter channels leave trailing cells empty.
pub fn to_tsv(preamble: &[&str], columns: &[Vec<f64>], sample_rate: u32) -> String {
    let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let fs = sample_rate as f64;
    let mut out = String::new();

    for line in preamble {
        out.push_str(line);
        out.push('\n');
    }

    for i in 0..rows {
        // String formatting is infallible
        let _ = write!(out, "{:.3}", i as f64 / fs);
        for column in columns {
            out.push('\t');
            if let Some(v) = column.get(i) {
                let _ = write!(out, "{:.6}", v);
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_table;

    #[test]
    fn test_tsv_layout() {
        let text = to_tsv(&["Interval=\t0.001 s"], &[vec![0.5, -1.0], vec![2.0, 3.0]], 1000);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0.000\t0.500000\t2.000000");
        assert_eq!(lines[2], "0.001\t-1.000000\t3.000000");
    }

    #[test]
    fn test_tsv_reads_back() {
        let text = to_tsv(&["Channel Title=\tECG\tTrigger"], &[vec![1.0, 2.0, 3.0], vec![0.0, 5.0, 5.0]], 500);
        let table = parse_table(&text, 500).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.channel_count(), 2);
        assert_eq!(table.channel(2).unwrap(), &[0.0, 5.0, 5.0]);
        assert_eq!(table.missing_count(), 0);
    }

    #[test]
    fn test_short_column_leaves_missing_cells() {
        let text = to_tsv(&[], &[vec![1.0, 2.0], vec![7.0]], 1000);
        let table = parse_table(&text, 1000).unwrap();
        assert_eq!(table.missing_count(), 1);
        assert_eq!(table.channel(2).unwrap(), &[7.0, 0.0]);
    }
}
