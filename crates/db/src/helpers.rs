use blood_core::{HistoryEntry, LevelRecord};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::Row;

use crate::error::Result;

/// Format written by SQLite's `CURRENT_TIMESTAMP` default, always UTC.
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored timestamp. Rows written by older deployments may carry the
/// SQLite default format instead of RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(value, SQLITE_TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

pub(crate) fn row_to_level_record(
    row: &Row<'_>,
) -> std::result::Result<LevelRecord, rusqlite::Error> {
    Ok(LevelRecord {
        id: row.get(0)?,
        level: row.get(1)?,
        last_reset: row.get(2)?,
        created_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

pub(crate) fn row_to_history_entry(
    row: &Row<'_>,
) -> std::result::Result<HistoryEntry, rusqlite::Error> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        successes: row.get(1)?,
        resulting_level: row.get(2)?,
        source_text: row.get(3)?,
        timestamp: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339_and_sqlite_defaults() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 5, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-05T12:30:00.000Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-05T13:30:00+01:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-05 12:30:00").unwrap(), expected);
        assert!(parse_timestamp("last tuesday").is_err());
    }

    #[test]
    fn formats_with_millis_in_utc() {
        let value = Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(value), "2025-04-02T00:00:00.000Z");
    }
}
