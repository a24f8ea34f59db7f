use blood_core::HistoryEntry;
use rusqlite::{Connection, params};

use crate::error::Result;
use crate::helpers::row_to_history_entry;
use crate::{Db, WriteTx};

fn insert_history(
    conn: &Connection,
    successes: i64,
    resulting_level: i64,
    source_text: Option<&str>,
    timestamp: &str,
) -> Result<HistoryEntry> {
    conn.execute(
        r#"
        INSERT INTO blood_history (successes, blood_level, message_content, timestamp)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![successes, resulting_level, source_text, timestamp],
    )?;
    Ok(HistoryEntry {
        id: conn.last_insert_rowid(),
        successes,
        resulting_level,
        source_text: source_text.map(str::to_string),
        timestamp: timestamp.to_string(),
    })
}

impl Db {
    /// Consumption history, newest first.
    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, successes, blood_level, message_content, timestamp
            FROM blood_history
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_history_entry)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn history_count(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM blood_history", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn insert_history(
        &mut self,
        successes: i64,
        resulting_level: i64,
        source_text: Option<&str>,
        timestamp: &str,
    ) -> Result<HistoryEntry> {
        self.write(|tx| tx.insert_history(successes, resulting_level, source_text, timestamp))
    }
}

impl WriteTx<'_> {
    pub fn insert_history(
        &self,
        successes: i64,
        resulting_level: i64,
        source_text: Option<&str>,
        timestamp: &str,
    ) -> Result<HistoryEntry> {
        insert_history(self.conn(), successes, resulting_level, source_text, timestamp)
    }
}
