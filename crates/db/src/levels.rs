use blood_core::LevelRecord;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::helpers::row_to_level_record;
use crate::{Db, WriteTx};

fn latest_level(conn: &Connection) -> Result<Option<LevelRecord>> {
    let record = conn
        .query_row(
            r#"
            SELECT id, level, last_reset, created_at
            FROM blood_level
            ORDER BY id DESC
            LIMIT 1
            "#,
            [],
            row_to_level_record,
        )
        .optional()?;
    Ok(record)
}

fn append_level(
    conn: &Connection,
    level: i64,
    last_reset: &str,
    created_at: &str,
) -> Result<LevelRecord> {
    conn.execute(
        "INSERT INTO blood_level (level, last_reset, created_at) VALUES (?1, ?2, ?3)",
        params![level, last_reset, created_at],
    )?;
    Ok(LevelRecord {
        id: conn.last_insert_rowid(),
        level,
        last_reset: last_reset.to_string(),
        created_at: created_at.to_string(),
    })
}

impl Db {
    pub fn latest_level(&self) -> Result<Option<LevelRecord>> {
        latest_level(&self.conn)
    }

    pub fn level_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM blood_level", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Level snapshots, newest first.
    pub fn level_records(&self, limit: usize) -> Result<Vec<LevelRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, level, last_reset, created_at
            FROM blood_level
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64], row_to_level_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Inserts the first record (`cap`, reset at `now`) unless one already exists.
    /// Returns whether a record was inserted.
    pub fn seed_level_if_empty(&mut self, cap: i64, now: &str) -> Result<bool> {
        self.write(|tx| {
            if tx.latest_level()?.is_some() {
                return Ok(false);
            }
            tx.append_level(cap, now, now)?;
            Ok(true)
        })
    }
}

impl WriteTx<'_> {
    pub fn latest_level(&self) -> Result<Option<LevelRecord>> {
        latest_level(self.conn())
    }

    pub fn append_level(
        &self,
        level: i64,
        last_reset: &str,
        created_at: &str,
    ) -> Result<LevelRecord> {
        append_level(self.conn(), level, last_reset, created_at)
    }
}
