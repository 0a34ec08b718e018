//! Time utilities: the caller-side "reference now" and future-date policy.
//!
//! Parsers never read the clock. The caller converts the current instant
//! into the user's zone once per message and passes the wall-clock result down.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Wall-clock time in an IANA tz like "Asia/Jakarta" for a UTC instant.
pub fn reference_now_in_tz(utc: DateTime<Utc>, tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(utc.with_timezone(&tz).naive_local())
}

/// Parse an explicit reference like "2025-08-22" or "2025-08-22 10:30".
///
/// A bare date means midnight of that day.
pub fn parse_reference(local: &str) -> Result<NaiveDateTime> {
    let local = local.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(local, fmt) {
            return Ok(ndt);
        }
    }
    let date = NaiveDate::parse_from_str(local, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid reference time '{local}': {e}"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

/// True when `date` lies more than `max_days` after `today`.
pub fn exceeds_future_window(date: NaiveDate, today: NaiveDate, max_days: i64) -> bool {
    (date - today).num_days() > max_days
}
