use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Start of the first day of the month after `after`, in UTC.
pub fn next_monthly_check(after: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if after.month() == 12 {
        (after.year() + 1, 1)
    } else {
        (after.year(), after.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(|| after + Duration::days(1))
}

/// Time to sleep from `now` until the next monthly check.
pub fn until_next_check(now: DateTime<Utc>) -> std::time::Duration {
    (next_monthly_check(now) - now)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn next_check_is_first_of_following_month() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 18, 30, 0).unwrap();
        assert_eq!(
            next_monthly_check(now),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn december_rolls_into_next_year() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            next_monthly_check(now),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn exactly_at_midnight_waits_a_full_month() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(
            next_monthly_check(now),
            Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            until_next_check(now),
            std::time::Duration::from_secs(30 * 24 * 60 * 60)
        );
    }
}
