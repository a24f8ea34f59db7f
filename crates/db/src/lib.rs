mod error;
mod helpers;
mod history;
mod levels;
mod migrations;

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

pub use error::{DbError, Result};
pub use helpers::{format_timestamp, parse_timestamp};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the SQLite ledger store. Dropping it closes the connection.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }

    /// Runs `f` inside an immediate transaction.
    ///
    /// SQLite hands out the write lock when the transaction begins, so two
    /// read-then-append sequences on different connections never interleave.
    /// The transaction commits only when `f` returns `Ok`.
    pub fn write<T, E>(
        &mut self,
        f: impl FnOnce(&WriteTx<'_>) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<DbError>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DbError::from)?;
        let write = WriteTx { tx };
        let value = f(&write)?;
        write.tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

/// Writer view handed to [`Db::write`] closures.
pub struct WriteTx<'conn> {
    tx: Transaction<'conn>,
}

impl WriteTx<'_> {
    fn conn(&self) -> &Connection {
        &self.tx
    }
}
