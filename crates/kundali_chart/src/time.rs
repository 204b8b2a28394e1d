//! Civil time ↔ Julian Day (UTC) conversion.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc};

use crate::error::ChartError;

/// JD of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Gregorian calendar date and fractional day to JD (Meeus, ch. 7).
fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

fn naive_utc_to_jd(utc: &NaiveDateTime) -> f64 {
    let seconds = utc.second() as f64 + utc.nanosecond() as f64 / 1e9;
    let day = utc.day() as f64
        + utc.hour() as f64 / 24.0
        + utc.minute() as f64 / 1440.0
        + seconds / 86_400.0;
    calendar_to_jd(utc.year(), utc.month(), day)
}

/// JD UTC of a zoned civil instant.
pub fn datetime_to_jd(dt: &DateTime<FixedOffset>) -> f64 {
    naive_utc_to_jd(&dt.naive_utc())
}

/// Zoned civil instant of a JD UTC, rounded to the millisecond.
pub fn jd_to_datetime(jd: f64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, ChartError> {
    if !jd.is_finite() {
        return Err(ChartError::InvalidTime(format!("non-finite JD {jd}")));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| ChartError::InvalidTime(format!("JD {jd} outside the civil calendar")))
}

/// Parse an RFC 3339 timestamp such as `1990-05-15T14:30:00+05:30`.
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, ChartError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| ChartError::InvalidTime(format!("{s:?}: {e}")))
}
