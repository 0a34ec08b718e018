//! Amount parsing for Indonesian money expressions.
//!
//! Handles both separator conventions (`1.234,56` and `1,234.56`) and the
//! magnitude shorthands people type in chat (`15rb`, `1.5jt`, `2 juta`).

use dompet_core::AmountRule;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

/// Magnitude suffixes, longest tokens first so alternation prefers them.
/// Single letters only count when followed by whitespace, punctuation or
/// the end of text, so `t-shirt` is not a trillion.
const SUFFIXES: &[(&str, f64)] = &[
    ("thousand", 1e3),
    ("trillion", 1e12),
    ("million", 1e6),
    ("billion", 1e9),
    ("milyar", 1e9),
    ("miliar", 1e9),
    ("juta", 1e6),
    ("ribu", 1e3),
    ("rb", 1e3),
    ("jt", 1e6),
    ("k", 1e3),
    ("t", 1e12),
];

/// Amount patterns in the order the extractor tries them
pub const SCAN_ORDER: [AmountRule; 3] =
    [AmountRule::Suffixed, AmountRule::Grouped, AmountRule::Digits];

/// A parsed amount and where it sits in the scanned text
#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    pub amount: f64,
    pub rule: AmountRule,
    pub span: Range<usize>,
}

fn alternation(letters: bool) -> String {
    SUFFIXES
        .iter()
        .map(|(s, _)| *s)
        .filter(|s| (s.len() == 1) == letters)
        .collect::<Vec<_>>()
        .join("|")
}

/// Suffix group: `word` for whole-word suffixes, `letter` for `k`/`t`
fn suffix_tail() -> String {
    format!(
        r"(?:(?P<word>{})\b|(?P<letter>{})(?:[\s,.;:!?)]|$))",
        alternation(false),
        alternation(true)
    )
}

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\brp\.?|\bidr\b|\busd\b|\bsgd\b|\beur\b|\bs\$|[$€£¥₹]")
            .expect("invalid currency regex")
    })
}

fn suffixed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(\d+(?:[.,]\d+)?)\s*{}", suffix_tail()))
            .expect("invalid suffix regex")
    })
}

fn grouped_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+(?:[.,]\d{3})*(?:[.,]\d{1,2})?$").expect("invalid grouped regex")
    })
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("invalid digits regex"))
}

/// Unanchored pattern used to locate an amount inside a sentence.
///
/// Suffixed and grouped forms may carry an `Rp` prefix so it leaves the
/// description together with the number.
pub fn scan_pattern(rule: AmountRule) -> &'static Regex {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    let res = RES.get_or_init(|| {
        let prefix = r"(?:\brp\.?\s*|\b)";
        [
            Regex::new(&format!(r"(?i){prefix}\d+(?:[.,]\d+)?\s*{}", suffix_tail()))
                .expect("invalid suffixed scan regex"),
            Regex::new(&format!(r"(?i){prefix}\d+(?:[.,]\d{{3}})*(?:[.,]\d{{1,2}})?\b"))
                .expect("invalid grouped scan regex"),
            Regex::new(r"\d+").expect("invalid digits scan regex"),
        ]
    });
    match rule {
        AmountRule::Suffixed => &res[0],
        AmountRule::Grouped => &res[1],
        AmountRule::Digits => &res[2],
    }
}

fn multiplier(suffix: &str) -> Option<f64> {
    SUFFIXES
        .iter()
        .find(|(s, _)| *s == suffix)
        .map(|(_, m)| *m)
}

/// Resolve `.`/`,` into a plain decimal literal.
///
/// With both present the rightmost one is the decimal point. With a single
/// kind, it is decimal only when it occurs once and is followed by 1-2
/// digits; otherwise it groups thousands.
fn normalize_separators(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let (decimal, grouping) = if comma > dot { (',', '.') } else { ('.', ',') };
            s.replace(grouping, "").replace(decimal, ".")
        }
        (Some(_), None) => single_separator(s, '.'),
        (None, Some(_)) => single_separator(s, ','),
        (None, None) => s.to_string(),
    }
}

fn single_separator(s: &str, sep: char) -> String {
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() == 2 && (1..=2).contains(&parts[1].len()) {
        s.replace(sep, ".")
    } else {
        s.replace(sep, "")
    }
}

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        debug!(value, "amount overflows");
        None
    }
}

fn to_amount(literal: &str) -> Option<f64> {
    match literal.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        Ok(v) => {
            debug!(literal, value = v, "amount out of range");
            None
        }
        Err(e) => {
            debug!(literal, error = %e, "unparseable amount literal");
            None
        }
    }
}

/// Parse an amount from a text fragment.
///
/// Supported formats:
/// - 150000, 150.000, 150,000, 1.234,56, 1,234.56
/// - 1.5k, 1.5jt, 2.5 juta, 3 milyar
/// - 150rb, 150 ribu, Rp 50.000
pub fn parse_amount(text: &str) -> Option<f64> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let cleaned = currency_re().replace_all(&lowered, "");
    let cleaned = cleaned.trim();

    if let Some(caps) = suffixed_re().captures(cleaned) {
        let base = to_amount(&caps[1].replace(',', "."))?;
        let suffix = caps.name("word").or_else(|| caps.name("letter"))?;
        let mult = multiplier(suffix.as_str())?;
        return finite((base * mult * 100.0).round() / 100.0);
    }

    if grouped_re().is_match(cleaned) {
        return to_amount(&normalize_separators(cleaned));
    }

    let m = digits_re().find(cleaned)?;
    to_amount(m.as_str())
}

/// Find the first positive amount in `text`, trying suffixed numbers, then
/// grouped numbers, then bare digit runs.
pub fn find_amount(text: &str) -> Option<AmountMatch> {
    for rule in SCAN_ORDER {
        for m in scan_pattern(rule).find_iter(text) {
            match parse_amount(m.as_str()) {
                Some(amount) if amount > 0.0 => {
                    debug!(?rule, span = m.as_str(), amount, "amount matched");
                    return Some(AmountMatch {
                        amount,
                        rule,
                        span: m.range(),
                    });
                }
                _ => continue,
            }
        }
    }
    None
}
