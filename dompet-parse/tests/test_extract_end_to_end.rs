use chrono::{NaiveDate, NaiveDateTime};
use dompet_core::{DateRule, TransactionRecord, TransactionType, default_taxonomy};
use dompet_parse::{classify, extract};

/// Friday 2025-08-22 10:00
fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 22)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Message -> transaction -> category, the way a chat handler strings it together.
fn record(text: &str) -> Option<TransactionRecord> {
    let now = reference();
    let parsed = extract(text, now)?;
    let category = classify(&parsed.description, parsed.kind, &default_taxonomy());
    Some(TransactionRecord::from_parsed(
        &parsed,
        category,
        now.date(),
        now.time(),
    ))
}

#[test]
fn test_everyday_expense() {
    let r = record("Beli makan 25000").unwrap();
    assert_eq!(r.kind, TransactionType::Expense);
    assert_eq!(r.amount, 25000.0);
    assert_eq!(r.description, "Beli makan");
    assert_eq!(r.category, "Makanan");
    // No date in the message: recorded for today
    assert_eq!(r.date, ymd(2025, 8, 22));
}

#[test]
fn test_salary_with_day_of_month() {
    let t = extract("Terima gaji 7,5 juta tgl 25", reference()).unwrap();
    assert_eq!(t.kind, TransactionType::Income);
    assert_eq!(t.amount, 7_500_000.0);
    assert_eq!(t.description, "Terima gaji");
    assert_eq!(t.date, Some(ymd(2025, 8, 25)));
    assert_eq!(t.date_rule, Some(DateRule::DayOfMonth));
    assert_eq!(t.income_keyword.as_deref(), Some("gaji"));

    let r = record("Terima gaji 7,5 juta tgl 25").unwrap();
    assert_eq!(r.category, "Gaji");
}

#[test]
fn test_bill_with_currency_prefix_and_natural_date() {
    let r = record("Bayar listrik Rp 150.000 kemarin").unwrap();
    assert_eq!(r.kind, TransactionType::Expense);
    assert_eq!(r.amount, 150000.0);
    assert_eq!(r.description, "Bayar listrik");
    assert_eq!(r.date, ymd(2025, 8, 21));
    assert_eq!(r.category, "Tagihan");
}

#[test]
fn test_weekday_phrase_and_filler_words() {
    let t = extract("Makan siang di warteg 25.000 senin lalu", reference()).unwrap();
    assert_eq!(t.amount, 25000.0);
    assert_eq!(t.description, "Makan siang warteg");
    assert_eq!(t.date, Some(ymd(2025, 8, 18)));
    assert_eq!(t.date_rule, Some(DateRule::Weekday));
}

#[test]
fn test_relative_week_is_not_sunday() {
    let r = record("Servis motor 2 minggu lalu 150rb").unwrap();
    assert_eq!(r.amount, 150000.0);
    assert_eq!(r.description, "Servis motor");
    assert_eq!(r.date, ymd(2025, 8, 8));
    assert_eq!(r.category, "Lainnya");
}

#[test]
fn test_chatter_is_not_a_transaction() {
    for text in ["halo apa kabar", "makasih ya", "", "minggu depan ketemu"] {
        assert!(extract(text, reference()).is_none(), "{text:?}");
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let a = extract("Ngopi 15rb tanggal 22/08/2025", reference());
    let b = extract("Ngopi 15rb tanggal 22/08/2025", reference());
    assert_eq!(a, b);
}

#[test]
fn test_json_carries_signals() {
    let t = extract("Servis motor 2 minggu lalu 150rb", reference()).unwrap();
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v["type"], "expense");
    assert_eq!(v["date"], "2025-08-08");
    assert_eq!(v["amount_rule"], "suffixed");
    assert_eq!(v["date_rule"], "relative");
    assert!(v["income_keyword"].is_null());
}
