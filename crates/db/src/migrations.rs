use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::format_timestamp;

const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

const MIGRATIONS: &[(&str, &str)] = &[("0001_init", MIGRATION_0001)];

const CREATE_MIGRATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    name TEXT PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

impl Db {
    /// Applies every migration not yet recorded in `schema_migrations`.
    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(CREATE_MIGRATIONS_TABLE)?;
        for (name, sql) in MIGRATIONS {
            if is_applied(&tx, name)? {
                continue;
            }
            tx.execute_batch(sql)?;
            tx.execute(
                "INSERT INTO schema_migrations (name, applied_at) VALUES (?1, ?2)",
                params![name, format_timestamp(Utc::now())],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Names of applied migrations, oldest first.
    pub fn applied_migrations(&self) -> Result<Vec<String>> {
        if !table_exists(&self.conn, "schema_migrations")? {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM schema_migrations ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<String>, _>>()?)
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        table_exists(&self.conn, table)
    }
}

fn is_applied(conn: &Connection, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM schema_migrations WHERE name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
