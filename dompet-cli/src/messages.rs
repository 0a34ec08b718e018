use chrono::{NaiveDate, NaiveDateTime};
use dompet_core::{
    TransactionRecord, TransactionType, amount_within_range, exceeds_future_window,
    format_currency, format_date_long,
};
use dompet_parse::{classify_scored, extract};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;

/// Outcome of one inbound chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Recorded { record: TransactionRecord, score: u32 },
    FutureDate { date: NaiveDate, max_days: i64 },
    AmountOutOfRange { amount: f64, min: f64, max: f64 },
    NotUnderstood,
}

impl Reply {
    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            Reply::Recorded { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Extract, apply the configured limits, classify.
///
/// `now` is the wall-clock time in the user's zone; it supplies "today" for
/// messages without a date and the time of day for every record.
pub fn handle_message(text: &str, cfg: &Config, now: NaiveDateTime) -> Reply {
    let Some(parsed) = extract(text, now) else {
        debug!(text, "message not understood");
        return Reply::NotUnderstood;
    };

    let today = now.date();
    let date = parsed.date_or(today);
    if exceeds_future_window(date, today, cfg.limits.max_future_days) {
        info!(%date, "rejected date beyond the future window");
        return Reply::FutureDate {
            date,
            max_days: cfg.limits.max_future_days,
        };
    }

    let (min, max) = (cfg.limits.min_amount, cfg.limits.max_amount);
    if !amount_within_range(parsed.amount, min, max) {
        info!(amount = parsed.amount, "rejected amount outside limits");
        return Reply::AmountOutOfRange {
            amount: parsed.amount,
            min,
            max,
        };
    }

    let category = classify_scored(&parsed.description, parsed.kind, &cfg.categories);
    let record = TransactionRecord::from_parsed(&parsed, category.name, today, now.time());
    info!(
        kind = %record.kind,
        amount = record.amount,
        category = %record.category,
        "transaction recorded"
    );
    Reply::Recorded {
        record,
        score: category.score,
    }
}

/// Human reply text, in Indonesian
pub fn render(reply: &Reply, cfg: &Config) -> String {
    let symbol = cfg.locale.currency_symbol.as_str();
    match reply {
        Reply::Recorded { record, .. } => {
            let (type_icon, label) = match record.kind {
                TransactionType::Income => ("💰", "Pemasukan"),
                TransactionType::Expense => ("💸", "Pengeluaran"),
            };
            let category_icon = cfg.categories.icon(record.kind, &record.category);
            let category = if category_icon.is_empty() {
                record.category.clone()
            } else {
                format!("{category_icon} {}", record.category)
            };
            format!(
                "✅ Transaksi berhasil dicatat!\n\
                 {type_icon} {label}: {}\n\
                 📝 Deskripsi: {}\n\
                 🏷️ Kategori: {category}\n\
                 📅 Tanggal: {}",
                format_currency(record.amount, symbol),
                record.description,
                format_date_long(record.date),
            )
        }
        Reply::FutureDate { date, max_days } => format!(
            "❌ Tanggal {} terlalu jauh di masa depan (maksimal {max_days} hari dari hari ini).",
            format_date_long(*date)
        ),
        Reply::AmountOutOfRange { amount, min, max } => format!(
            "❌ Jumlah {} di luar batas ({} - {}).",
            format_currency(*amount, symbol),
            format_currency(*min, symbol),
            format_currency(*max, symbol)
        ),
        Reply::NotUnderstood => "❓ Saya tidak mengerti pesan Anda.\n\n\
             💡 Contoh yang bisa saya pahami:\n\
             • Beli makan 25000\n\
             • Gaji bulan ini 5 juta\n\
             • Ngopi 15rb kemarin"
            .to_string(),
    }
}
