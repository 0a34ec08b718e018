use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::io::BufRead;
use tracing::warn;

use crate::config::Config;
use crate::ledger::Ledger;
use crate::messages::{Reply, handle_message};

/// A line that did not become a ledger row
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub line: usize,
    pub text: String,
    pub reply: Reply,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub ledger: Ledger,
    pub skipped: Vec<Skipped>,
}

/// Handle one message per line against a single reference time.
///
/// Blank lines and `#` comments are ignored.
pub fn run_batch<R: BufRead>(input: R, cfg: &Config, now: NaiveDateTime) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", idx + 1))?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let reply = handle_message(text, cfg, now);
        match reply.record() {
            Some(record) => {
                report.ledger.push(record);
            }
            None => {
                warn!(line = idx + 1, text, "skipped");
                report.skipped.push(Skipped {
                    line: idx + 1,
                    text: text.to_string(),
                    reply,
                });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 22)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_rows_and_skips() {
        let input = Cursor::new(
            "# agustus\n\
             Gaji bulan ini 5 juta\n\
             Beli makan 25000 kemarin\n\
             \n\
             halo apa kabar\n\
             Bayar kos 1,5jt 01/01/2030\n",
        );
        let report = run_batch(input, &Config::default(), reference()).unwrap();

        let rows = report.ledger.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Gaji");
        assert_eq!(rows[0].balance, 5_000_000.0);
        assert_eq!(rows[1].date, "21/08/2025");
        assert_eq!(rows[1].balance, 4_975_000.0);

        let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![5, 6]);
        assert_eq!(report.skipped[0].reply, Reply::NotUnderstood);
        assert!(matches!(report.skipped[1].reply, Reply::FutureDate { .. }));
    }

    #[test]
    fn test_csv_file_output() {
        let input = Cursor::new("Ngopi 15rb tanggal 22/08/2025\n");
        let report = run_batch(input, &Config::default(), reference()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let file = std::fs::File::create(&path).unwrap();
        report.ledger.write_csv(file).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "Tanggal");
        assert_eq!(&headers[6], "Saldo");
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[2], "Makanan");
        assert_eq!(&rec[3], "Ngopi");
        assert_eq!(&rec[5], "15000.0");
    }
}
