use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Calendar day of a UTC instant.
///
/// Journal filters compare by year-month-day, never by exact timestamp.
pub fn calendar_day(instant: &DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// True when both instants fall on the same UTC calendar day.
pub fn same_calendar_day(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    calendar_day(a) == calendar_day(b)
}

/// Inclusive range check on both ends.
pub fn within_range(instant: &DateTime<Utc>, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    instant >= start && instant <= end
}

/// RFC 3339 rendering with nanosecond precision and a `Z` suffix.
///
/// Used for key suffixes, so the fixed width keeps keys of one trade ordered
/// by expiration.
pub fn to_rfc3339_nanos(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
