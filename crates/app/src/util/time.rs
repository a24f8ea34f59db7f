use chrono::{DateTime, Datelike, Utc};

/// Calendar months from `earlier` to `later`, ignoring the day of month.
/// Crossing a month boundary counts as one month even if only minutes elapsed.
pub fn months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let years = i64::from(later.year()) - i64::from(earlier.year());
    let months = i64::from(later.month()) - i64::from(earlier.month());
    years * 12 + months
}
