use anyhow::{Context, Result};
use dompet_core::{TransactionRecord, format_date_short};
use serde::Serialize;
use std::io::Write;

/// One ledger line, columns in spreadsheet order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Waktu")]
    pub time: String,
    #[serde(rename = "Kategori")]
    pub category: String,
    #[serde(rename = "Deskripsi")]
    pub description: String,
    #[serde(rename = "Pemasukan")]
    pub income: Option<f64>,
    #[serde(rename = "Pengeluaran")]
    pub expense: Option<f64>,
    #[serde(rename = "Saldo")]
    pub balance: f64,
}

/// Recorded transactions with a running balance
#[derive(Debug, Default)]
pub struct Ledger {
    balance: f64,
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &TransactionRecord) -> &LedgerRow {
        self.balance += record.signed_amount();
        self.rows.push(LedgerRow {
            date: format_date_short(record.date),
            time: record.time.format("%H:%M:%S").to_string(),
            category: record.category.clone(),
            description: record.description.clone(),
            income: record.income(),
            expense: record.expense(),
            balance: self.balance,
        });
        &self.rows[self.rows.len() - 1]
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// CSV with a header row, even when empty
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(out);
        if self.is_empty() {
            wtr.write_record([
                "Tanggal",
                "Waktu",
                "Kategori",
                "Deskripsi",
                "Pemasukan",
                "Pengeluaran",
                "Saldo",
            ])
            .context("write csv header")?;
        }
        for row in self.rows() {
            wtr.serialize(row).context("write csv row")?;
        }
        wtr.flush().context("flush csv")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use dompet_core::TransactionType;

    fn record(
        kind: TransactionType,
        amount: f64,
        category: &str,
        description: &str,
    ) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            kind,
            category: category.to_string(),
            description: description.to_string(),
            amount,
        }
    }

    #[test]
    fn test_running_balance() {
        let mut ledger = Ledger::new();
        ledger.push(&record(TransactionType::Income, 5_000_000.0, "Gaji", "Gaji"));
        let row = ledger.push(&record(
            TransactionType::Expense,
            25_000.0,
            "Makanan",
            "Beli makan",
        ));
        assert_eq!(row.balance, 4_975_000.0);
        assert_eq!(row.income, None);
        assert_eq!(row.expense, Some(25_000.0));
        assert_eq!(ledger.balance(), 4_975_000.0);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_csv_columns() {
        let mut ledger = Ledger::new();
        ledger.push(&record(TransactionType::Expense, 15_000.0, "Makanan", "Ngopi"));

        let mut buf = Vec::new();
        ledger.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Tanggal,Waktu,Kategori,Deskripsi,Pemasukan,Pengeluaran,Saldo")
        );
        assert_eq!(lines.next(), Some("22/08/2025,10:00:00,Makanan,Ngopi,,15000.0,-15000.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_ledger_still_has_header() {
        let mut buf = Vec::new();
        Ledger::new().write_csv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Tanggal,Waktu,Kategori,Deskripsi,Pemasukan,Pengeluaran,Saldo\n"
        );
    }
}
