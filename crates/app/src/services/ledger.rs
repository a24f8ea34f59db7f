use blood_core::{HistoryEntry, LevelRecord, RollEvent, RollOutcome};
use blood_db::{Db, WriteTx, format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::months_between;

/// Authoritative state machine for the city blood level.
///
/// Every operation opens its own store handle. Operations that read the
/// current level and append a new one run in a single write transaction, so
/// concurrent rolls, admin sets and resets are applied one after another.
#[derive(Clone)]
pub struct BloodLedger {
    config: SharedConfig,
}

impl BloodLedger {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        let db = open_db(&self.config)?;
        if !db.table_exists("blood_level")? {
            return Err(AppError::NotInitialized);
        }
        Ok(db)
    }

    pub fn cap(&self) -> i64 {
        self.config.cap
    }

    pub fn initialize(&self) -> Result<LevelRecord> {
        self.initialize_at(Utc::now())
    }

    /// Creates the tables and seeds `cap` with a reset at `now` if no level exists yet.
    pub fn initialize_at(&self, now: DateTime<Utc>) -> Result<LevelRecord> {
        let mut db = open_db(&self.config)?;
        db.migrate()?;
        if db.seed_level_if_empty(self.config.cap, &format_timestamp(now))? {
            info!(level = self.config.cap, "seeded blood level");
        }
        db.latest_level()?.ok_or(AppError::NotInitialized)
    }

    pub fn current_record(&self) -> Result<LevelRecord> {
        self.db()?.latest_level()?.ok_or(AppError::NotInitialized)
    }

    pub fn current_level(&self) -> Result<i64> {
        Ok(self.current_record()?.level)
    }

    pub fn set_level(&self, amount: i64) -> Result<i64> {
        self.set_level_at(amount, Utc::now())
    }

    /// Appends `amount` as the new level. Range checks belong to the caller, and
    /// the reset timestamp carries over unchanged.
    pub fn set_level_at(&self, amount: i64, now: DateTime<Utc>) -> Result<i64> {
        let now = format_timestamp(now);
        let record = self.db()?.write(|tx| {
            let current = require_current(tx)?;
            Ok::<_, AppError>(tx.append_level(amount, &current.last_reset, &now)?)
        })?;
        info!(level = record.level, "blood level set");
        Ok(record.level)
    }

    pub fn decrease(&self, amount: i64) -> Result<i64> {
        self.decrease_at(amount, Utc::now())
    }

    pub fn decrease_at(&self, amount: i64, now: DateTime<Utc>) -> Result<i64> {
        let now = format_timestamp(now);
        self.db()?.write(|tx| decrease_in(tx, amount, &now))
    }

    pub fn check_and_reset_monthly(&self) -> Result<bool> {
        self.check_and_reset_monthly_at(Utc::now())
    }

    /// Restores the level to the cap when `now` falls in a later calendar month
    /// than the last reset. Calling it again in the same month is a no-op.
    pub fn check_and_reset_monthly_at(&self, now: DateTime<Utc>) -> Result<bool> {
        let cap = self.config.cap;
        let was_reset = self.db()?.write(|tx| {
            let current = require_current(tx)?;
            let last_reset = parse_timestamp(&current.last_reset)?;
            if months_between(last_reset, now) < 1 {
                return Ok::<_, AppError>(false);
            }
            let stamp = format_timestamp(now);
            tx.append_level(cap, &stamp, &stamp)?;
            Ok(true)
        })?;
        if was_reset {
            info!(level = cap, "monthly blood reset completed");
        }
        Ok(was_reset)
    }

    pub fn record_history(
        &self,
        successes: i64,
        resulting_level: i64,
        source_text: Option<&str>,
    ) -> Result<i64> {
        self.record_history_at(successes, resulting_level, source_text, Utc::now())
    }

    pub fn record_history_at(
        &self,
        successes: i64,
        resulting_level: i64,
        source_text: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let entry = self.db()?.insert_history(
            successes,
            resulting_level,
            source_text,
            &format_timestamp(now),
        )?;
        Ok(entry.id)
    }

    /// Consumption history, newest first.
    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        Ok(self.db()?.history(limit)?)
    }

    pub fn process_roll_event(&self, event: &RollEvent) -> Result<Option<RollOutcome>> {
        self.process_roll_event_at(event, Utc::now())
    }

    /// Applies a roll message from the configured bot and channel.
    ///
    /// The monthly check runs before parsing so a roll arriving in a new month
    /// is counted against the restored level. Rolls without successes leave no
    /// history, even when a reset just happened.
    pub fn process_roll_event_at(
        &self,
        event: &RollEvent,
        now: DateTime<Utc>,
    ) -> Result<Option<RollOutcome>> {
        if !self.config.roll_source.matches(event) {
            return Ok(None);
        }
        let was_reset = self.check_and_reset_monthly_at(now)?;

        let parsed = roll_ingest::parse_roll_event(event);
        if parsed.successes == 0 {
            debug!("roll message carried no successes");
            return Ok(None);
        }
        let successes = i64::try_from(parsed.successes).unwrap_or(i64::MAX);
        let stamp = format_timestamp(now);
        let new_level = self.db()?.write(|tx| {
            let new_level = decrease_in(tx, successes, &stamp)?;
            tx.insert_history(successes, new_level, parsed.source_text.as_deref(), &stamp)?;
            Ok::<_, AppError>(new_level)
        })?;
        info!(successes, new_level, was_reset, "blood consumed");
        Ok(Some(RollOutcome {
            successes,
            new_level,
            was_reset,
        }))
    }
}

fn require_current(tx: &WriteTx<'_>) -> Result<LevelRecord> {
    tx.latest_level()?.ok_or(AppError::NotInitialized)
}

/// Appends `max(0, current - amount)` without touching the reset timestamp.
fn decrease_in(tx: &WriteTx<'_>, amount: i64, now: &str) -> Result<i64> {
    let current = require_current(tx)?;
    let new_level = current.level.saturating_sub(amount).max(0);
    tx.append_level(new_level, &current.last_reset, now)?;
    Ok(new_level)
}
