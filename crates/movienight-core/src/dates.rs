//! Calendar dates in, timestamps out.
//!
//! Watch dates are picked as plain calendar dates. They are sent as the
//! viewer's local midnight, expressed as a UTC instant, so history sorts the
//! same way for everyone.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Utc,
};

/// Local midnight of `date` in `tz`. When midnight falls into a DST gap the
/// first valid minute of the day is used.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => (1..=24 * 60)
            .find_map(|minutes| {
                tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    }
}

/// The `watched_at` value sent to the backend, e.g. `2024-01-14T23:00:00Z`
pub fn normalize_watch_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> String {
    local_midnight(date, tz).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a `watched_at` from the backend. The server stores UTC without an
/// offset, so naive timestamps are UTC; bare dates mean local midnight in `tz`.
pub fn parse_watched_at<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| local_midnight(date, tz))
}

/// Calendar date of a `watched_at` as seen in `tz`
pub fn local_watch_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    parse_watched_at(raw, tz).map(|dt| dt.with_timezone(tz).date_naive())
}

pub fn today<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}
