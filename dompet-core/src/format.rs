//! Indonesian display helpers for amounts and dates.

use chrono::{Datelike, NaiveDate};

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// Group an integer with `.` every three digits: 1500000 -> "1.500.000"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Compact Rupiah-style amount.
///
/// Billions as `M`, millions as `jt`, small thousands as `rb`, everything
/// else grouped with dots:
/// - 2_500_000_000 -> "Rp 2.5M"
/// - 1_500_000 -> "Rp 1.5jt"
/// - 5_000 -> "Rp 5rb"
/// - 25_000 -> "Rp 25.000"
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{symbol} 0");
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    let body = if abs >= 1_000_000_000.0 {
        format!("{:.1}M", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}jt", abs / 1_000_000.0)
    } else if abs >= 1_000.0 && abs < 10_000.0 {
        format!("{:.0}rb", abs / 1_000.0)
    } else {
        group_thousands(abs.round() as u64)
    };

    format!("{symbol} {sign}{body}")
}

/// "22/08/2025"
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "22 Agustus 2025"
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

/// Inclusive range check used before recording an amount
pub fn amount_within_range(amount: f64, min: f64, max: f64) -> bool {
    amount.is_finite() && min <= amount && amount <= max
}
