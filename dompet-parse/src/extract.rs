//! Turn a chat message into a structured transaction.
//!
//! The date span is located and cut out first, then the amount span, and
//! whatever is left (minus filler words) becomes the description. Spans are
//! removed by byte range so a repeated substring elsewhere is left alone.

use chrono::NaiveDateTime;
use dompet_core::{ParsedTransaction, TransactionType};
use std::ops::Range;
use tracing::debug;

use crate::amount::find_amount;
use crate::date::find_date;

/// Any of these anywhere in the message makes it income
pub const INCOME_KEYWORDS: &[&str] = &[
    "gaji",
    "salary",
    "upah",
    "bonus",
    "tunjangan",
    "stipend",
    "terima",
    "received",
    "dapat",
    "pendapatan",
    "pemasukan",
    "income",
    "transfer masuk",
    "dividen",
    "dividend",
    "bunga",
    "interest",
    "profit",
    "keuntungan",
    "freelance",
    "project fee",
];

/// Connectives dropped from the description
const FILLER_WORDS: &[&str] = &[
    "pada", "di", "untuk", "dari", "ke", "yang", "adalah", "dengan", "tanggal", "tgl",
];

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_span(text: &str, span: Range<usize>) -> String {
    collapse_whitespace(&format!("{} {}", &text[..span.start], &text[span.end..]))
}

fn find_income_keyword(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    INCOME_KEYWORDS.iter().copied().find(|k| lower.contains(k))
}

fn is_edge_punct(c: char) -> bool {
    matches!(c, ',' | '.' | '-' | ':' | ';' | '/' | '|' | '(' | ')')
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remaining words minus fillers and stray punctuation, capitalised.
fn clean_description(remaining: &str, kind: TransactionType) -> String {
    let kept: Vec<&str> = remaining
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .filter(|token| {
            let word = token.trim_matches(is_edge_punct).to_lowercase();
            !FILLER_WORDS.contains(&word.as_str())
        })
        .collect();

    let joined = kept.join(" ");
    let description = joined.trim_matches(|c: char| is_edge_punct(c) || c.is_whitespace());
    if description.is_empty() {
        return kind.placeholder_description().to_string();
    }
    capitalize_first(description)
}

/// Extract a transaction from free text.
///
/// Examples:
/// - "Beli makan 25000" -> expense 25000 "Beli makan"
/// - "Gaji bulan ini 5 juta" -> income 5000000 "Gaji bulan ini"
/// - "Ngopi 15rb tanggal 22/08/2025" -> expense 15000 "Ngopi", 2025-08-22
///
/// Returns `None` when no positive amount is present. The category is left
/// to the caller.
pub fn extract(text: &str, now: NaiveDateTime) -> Option<ParsedTransaction> {
    let original = text.trim();
    if original.is_empty() {
        return None;
    }
    let mut working = collapse_whitespace(original);

    let date = find_date(&working, now);
    if let Some(m) = &date {
        working = remove_span(&working, m.span.clone());
    }

    let Some(amount) = find_amount(&working) else {
        debug!(text = original, "no amount found, not a transaction");
        return None;
    };
    working = remove_span(&working, amount.span.clone());

    let income_keyword = find_income_keyword(original).or_else(|| find_income_keyword(&working));
    let kind = if income_keyword.is_some() {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };

    let description = clean_description(&working, kind);

    let parsed = ParsedTransaction {
        kind,
        amount: amount.amount,
        description,
        date: date.as_ref().map(|m| m.date),
        amount_rule: amount.rule,
        date_rule: date.as_ref().map(|m| m.rule),
        income_keyword: income_keyword.map(str::to_string),
    };
    debug!(
        kind = %parsed.kind,
        amount = parsed.amount,
        description = %parsed.description,
        date = ?parsed.date,
        "transaction extracted"
    );
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dompet_core::{AmountRule, DateRule};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 22)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_remove_span_is_positional() {
        // Only the second "5000" is removed
        let text = "kode 5000 bayar 5000";
        assert_eq!(remove_span(text, 16..20), "kode 5000 bayar");
    }

    #[test]
    fn test_clean_description_drops_fillers() {
        assert_eq!(
            clean_description("bayar untuk listrik di rumah", TransactionType::Expense),
            "Bayar listrik rumah"
        );
        assert_eq!(clean_description("ke -", TransactionType::Expense), "Transaksi");
        assert_eq!(clean_description("", TransactionType::Income), "Pemasukan");
        assert_eq!(clean_description("ngopi,", TransactionType::Expense), "Ngopi");
    }

    #[test]
    fn test_expense_with_digits() {
        let t = extract("Beli makan 25000", reference()).unwrap();
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.amount, 25000.0);
        assert_eq!(t.description, "Beli makan");
        assert_eq!(t.date, None);
        assert_eq!(t.amount_rule, AmountRule::Grouped);
        assert_eq!(t.income_keyword, None);
    }

    #[test]
    fn test_income_with_suffix() {
        let t = extract("Gaji bulan ini 5 juta", reference()).unwrap();
        assert_eq!(t.kind, TransactionType::Income);
        assert_eq!(t.amount, 5_000_000.0);
        assert_eq!(t.description, "Gaji bulan ini");
        assert_eq!(t.date, None);
        assert_eq!(t.income_keyword.as_deref(), Some("gaji"));
    }

    #[test]
    fn test_date_span_removed() {
        let t = extract("Ngopi 15rb tanggal 22/08/2025", reference()).unwrap();
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.amount, 15000.0);
        assert_eq!(t.description, "Ngopi");
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 8, 22));
        assert_eq!(t.date_rule, Some(DateRule::Numeric));
        assert_eq!(t.amount_rule, AmountRule::Suffixed);
    }

    #[test]
    fn test_no_amount_is_not_a_transaction() {
        assert!(extract("halo apa kabar", reference()).is_none());
        assert!(extract("   ", reference()).is_none());
        assert!(extract("kemarin makan enak", reference()).is_none());
    }

    #[test]
    fn test_trailing_amount_is_not_a_year() {
        let t = extract("Beli pulsa 5 mei 5000", reference()).unwrap();
        assert_eq!(t.amount, 5000.0);
        assert_eq!(t.description, "Beli pulsa");
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2026, 5, 5));

        let t = extract("Bayar arisan 12 jan 2500", reference()).unwrap();
        assert_eq!(t.amount, 2500.0);
        assert_eq!(t.description, "Bayar arisan");
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2026, 1, 12));
    }

    #[test]
    fn test_week_duration_stays_in_description() {
        let t = extract("Sewa kos 2 minggu 500rb", reference()).unwrap();
        assert_eq!(t.amount, 500_000.0);
        assert_eq!(t.date, None);
        assert_eq!(t.description, "Sewa kos 2 minggu");
    }

    #[test]
    fn test_letter_suffix_inside_word() {
        let t = extract("Beli 2 t-shirt 100rb", reference()).unwrap();
        assert_eq!(t.amount, 100_000.0);
        assert_eq!(t.description, "Beli 2 t-shirt");
    }

    #[test]
    fn test_overflowing_amount_never_infinite() {
        let text = format!("Beli {}t", "9".repeat(300));
        if let Some(t) = extract(&text, reference()) {
            assert!(t.amount.is_finite());
        }
    }

    #[test]
    fn test_placeholder_when_only_amount() {
        let t = extract("50rb", reference()).unwrap();
        assert_eq!(t.description, "Transaksi");
        let t = extract("terima 2jt", reference()).unwrap();
        assert_eq!(t.kind, TransactionType::Income);
        assert_eq!(t.description, "Terima");
    }
}
