//! Date expressions in Indonesian and English chat text.
//!
//! Each [`DateRule`] pairs a pattern with a resolver. `parse_date` matches a
//! whole fragment against the rules in [`PARSE_ORDER`]; `find_date` scans a
//! sentence with the rules in [`SCAN_ORDER`]. Everything resolves against an
//! explicit reference time, never the system clock.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use dompet_core::DateRule;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

/// Rule order for a whole fragment: unambiguous forms first
pub const PARSE_ORDER: [DateRule; 6] = [
    DateRule::Natural,
    DateRule::Numeric,
    DateRule::MonthName,
    DateRule::Weekday,
    DateRule::Relative,
    DateRule::DayOfMonth,
];

/// Rule order for scanning a sentence.
///
/// Relative phrases go before weekdays: `minggu` is both "Sunday" and
/// "week", and `2 minggu lalu` must not resolve to a Sunday.
pub const SCAN_ORDER: [DateRule; 6] = [
    DateRule::Numeric,
    DateRule::MonthName,
    DateRule::Relative,
    DateRule::DayOfMonth,
    DateRule::Natural,
    DateRule::Weekday,
];

const COUNT_WORDS: &[&str] = &["satu", "dua", "tiga", "empat", "lima", "beberapa"];

const PREFIX: &str = r"(?:(?:tanggal|tgl)\.?\s*)?";

const MONTHS: &str = "januari|january|februari|february|maret|march|april|mei|may|juni|june|\
juli|july|agustus|august|september|oktober|october|november|desember|december|\
jan|feb|mar|apr|jun|jul|agu|agt|ags|aug|sept|sep|okt|oct|nov|des|dec";

const WEEKDAYS: &str = "senin|selasa|rabu|kamis|jum'?at|sabtu|minggu|ahad|\
monday|tuesday|wednesday|thursday|friday|saturday|sunday";

/// A resolved date and where it sits in the scanned text
#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub rule: DateRule,
    pub span: Range<usize>,
}

fn body(rule: DateRule) -> String {
    match rule {
        DateRule::Natural => concat!(
            r"(?P<word>kemarin\s+lusa|hari\s+ini|sekarang|today",
            r"|kemarin|yesterday|besok|tomorrow|lusa)"
        )
        .to_string(),
        DateRule::Numeric => format!(
            r"{prefix}(?:{iso}|{dmy})",
            prefix = PREFIX,
            iso = r"(?P<iy>\d{4})-(?P<im>\d{1,2})-(?P<id>\d{1,2})",
            dmy = r"(?P<d>\d{1,2})(?P<s1>[/.\-])(?P<m>\d{1,2})(?P<s2>[/.\-])(?P<y>\d{4}|\d{2})"
        ),
        DateRule::MonthName => {
            format!(
                r"{prefix}(?P<d>\d{{1,2}})\s*(?P<mon>{months})(?:\s+(?P<y>(?:19|20)\d{{2}}))?",
                prefix = PREFIX,
                months = MONTHS
            )
        }
        DateRule::Weekday => {
            format!(
                r"(?:hari\s+)?(?P<wd>{weekdays})(?:\s+(?P<tail>ini|depan|lalu))?",
                weekdays = WEEKDAYS
            )
        }
        DateRule::Relative => concat!(
            r"(?:(?P<n>\d{1,3}|se|an?|one)\s*)?",
            r"(?P<unit>hari|minggu|bulan|days?|weeks?|months?)",
            r"\s+(?:(?:yang\s+)?lalu|ago)"
        )
        .to_string(),
        DateRule::DayOfMonth => r"(?:tanggal|tgl)\.?\s*(?P<d>\d{1,2})".to_string(),
    }
}

fn slot(rule: DateRule) -> usize {
    match rule {
        DateRule::Natural => 0,
        DateRule::Numeric => 1,
        DateRule::MonthName => 2,
        DateRule::Weekday => 3,
        DateRule::Relative => 4,
        DateRule::DayOfMonth => 5,
    }
}

/// Compile every rule's body; `PARSE_ORDER` matches the `slot` numbering
fn compile(wrap: impl Fn(&str) -> String) -> Vec<Regex> {
    PARSE_ORDER
        .iter()
        .map(|rule| Regex::new(&wrap(&body(*rule))).expect("invalid date regex"))
        .collect()
}

/// Anchored, case-insensitive pattern for a whole fragment
pub fn exact_pattern(rule: DateRule) -> &'static Regex {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    &RES.get_or_init(|| compile(|b| format!(r"(?i)^(?:{b})$")))[slot(rule)]
}

/// Word-bounded, case-insensitive pattern for scanning a sentence
pub fn scan_pattern(rule: DateRule) -> &'static Regex {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    &RES.get_or_init(|| compile(|b| format!(r"(?i)\b(?:{b})\b")))[slot(rule)]
}

fn offset(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix: String = lower.chars().take(3).collect();
    Some(match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "mei" | "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "agu" | "agt" | "ags" | "aug" => 8,
        "sep" => 9,
        "okt" | "oct" => 10,
        "nov" => 11,
        "des" | "dec" => 12,
        _ => return None,
    })
}

fn weekday_from(name: &str) -> Option<Weekday> {
    Some(match name.to_lowercase().replace('\'', "").as_str() {
        "senin" | "monday" => Weekday::Mon,
        "selasa" | "tuesday" => Weekday::Tue,
        "rabu" | "wednesday" => Weekday::Wed,
        "kamis" | "thursday" => Weekday::Thu,
        "jumat" | "friday" => Weekday::Fri,
        "sabtu" | "saturday" => Weekday::Sat,
        "minggu" | "ahad" | "sunday" => Weekday::Sun,
        _ => return None,
    })
}

/// 00-68 -> 2000s, 69-99 -> 1900s
fn expand_year(raw: &str) -> Option<i32> {
    let y: i32 = raw.parse().ok()?;
    Some(match raw.len() {
        2 if y < 69 => 2000 + y,
        2 => 1900 + y,
        _ => y,
    })
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

fn resolve_natural(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let word = caps
        .name("word")?
        .as_str()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let days = match word.as_str() {
        "hari ini" | "sekarang" | "today" => 0,
        "kemarin lusa" => -2,
        "kemarin" | "yesterday" => -1,
        "besok" | "tomorrow" => 1,
        "lusa" => 2,
        _ => return None,
    };
    offset(today, days)
}

fn resolve_numeric(caps: &Captures<'_>) -> Option<NaiveDate> {
    if let Some(iy) = caps.name("iy") {
        let y: i32 = iy.as_str().parse().ok()?;
        let m: u32 = caps.name("im")?.as_str().parse().ok()?;
        let d: u32 = caps.name("id")?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if caps.name("s1")?.as_str() != caps.name("s2")?.as_str() {
        return None;
    }
    let d: u32 = caps.name("d")?.as_str().parse().ok()?;
    let m: u32 = caps.name("m")?.as_str().parse().ok()?;
    let y = expand_year(caps.name("y")?.as_str())?;
    NaiveDate::from_ymd_opt(y, m, d)
}

fn resolve_month_name(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let day: u32 = caps.name("d")?.as_str().parse().ok()?;
    let month = month_number(caps.name("mon")?.as_str())?;

    if let Some(y) = caps.name("y") {
        return NaiveDate::from_ymd_opt(y.as_str().parse().ok()?, month, day);
    }

    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn resolve_weekday(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let name = caps.name("wd")?.as_str();
    let target = weekday_from(name)?;
    let tail = caps.name("tail").map(|t| t.as_str().to_lowercase());

    // "minggu ini/depan/lalu" means this/next/last week, not Sunday
    if tail.is_some() && name.eq_ignore_ascii_case("minggu") {
        return None;
    }

    let target = i64::from(target.num_days_from_monday());
    let current = i64::from(today.weekday().num_days_from_monday());
    let ahead = (target - current).rem_euclid(7);

    let days = match tail.as_deref() {
        Some("depan") if ahead == 0 => 7,
        Some("lalu") => {
            let behind = (current - target).rem_euclid(7);
            if behind == 0 { -7 } else { -behind }
        }
        _ => ahead,
    };
    offset(today, days)
}

fn resolve_relative(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let count: i64 = match caps.name("n").map(|n| n.as_str().to_lowercase()) {
        None => 1,
        Some(n) if n.chars().all(|c| c.is_ascii_digit()) => n.parse().ok()?,
        Some(_) => 1,
    };
    let unit = caps.name("unit")?.as_str().to_lowercase();
    let per_unit = match unit.as_str() {
        "hari" | "day" | "days" => 1,
        "minggu" | "week" | "weeks" => 7,
        // Months are a flat 30 days
        "bulan" | "month" | "months" => 30,
        _ => return None,
    };
    offset(today, -(count * per_unit))
}

fn resolve_day_of_month(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let day: u32 = caps.name("d")?.as_str().parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }

    if let Some(date) = NaiveDate::from_ymd_opt(today.year(), today.month(), day) {
        if date >= today {
            return Some(date);
        }
    }

    let (y, m) = next_month(today.year(), today.month());
    NaiveDate::from_ymd_opt(y, m, day).or_else(|| {
        let (y, m) = next_month(y, m);
        NaiveDate::from_ymd_opt(y, m, day)
    })
}

/// `2 minggu` or `dua minggu` is a duration, not Sunday
fn counts_weeks(before: &str, caps: &Captures<'_>) -> bool {
    let (Some(whole), Some(wd)) = (caps.get(0), caps.name("wd")) else {
        return false;
    };
    if whole.start() != wd.start() || !wd.as_str().eq_ignore_ascii_case("minggu") {
        return false;
    }
    before.split_whitespace().next_back().is_some_and(|word| {
        word.chars().all(|c| c.is_ascii_digit())
            || COUNT_WORDS.contains(&word.to_lowercase().as_str())
    })
}

/// Turn a rule's captures into a date, or `None` when the literal is invalid
pub fn resolve(rule: DateRule, caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    match rule {
        DateRule::Natural => resolve_natural(caps, today),
        DateRule::Numeric => resolve_numeric(caps),
        DateRule::MonthName => resolve_month_name(caps, today),
        DateRule::Weekday => resolve_weekday(caps, today),
        DateRule::Relative => resolve_relative(caps, today),
        DateRule::DayOfMonth => resolve_day_of_month(caps, today),
    }
}

/// Parse a date fragment like "kemarin", "25/12/2024", "25 Des" or "tgl 15".
///
/// The first rule in [`PARSE_ORDER`] that matches the whole trimmed text
/// and resolves to a valid date wins.
pub fn parse_date(text: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let today = now.date();

    for rule in PARSE_ORDER {
        let Some(caps) = exact_pattern(rule).captures(text) else {
            continue;
        };
        if let Some(date) = resolve(rule, &caps, today) {
            debug!(?rule, text, %date, "date parsed");
            return Some(date);
        }
    }
    None
}

/// Find the first date expression in a sentence.
pub fn find_date(text: &str, now: NaiveDateTime) -> Option<DateMatch> {
    let today = now.date();

    for rule in SCAN_ORDER {
        for caps in scan_pattern(rule).captures_iter(text) {
            let Some(date) = resolve(rule, &caps, today) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if rule == DateRule::Weekday && counts_weeks(&text[..whole.start()], &caps) {
                continue;
            }
            debug!(?rule, span = whole.as_str(), %date, "date matched");
            return Some(DateMatch {
                date,
                rule,
                span: whole.range(),
            });
        }
    }
    None
}
