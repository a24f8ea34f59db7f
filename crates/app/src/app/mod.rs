use std::path::PathBuf;

use blood_core::{DEFAULT_CAP, LevelRecord, RollSource};
use blood_db::Db;

use crate::error::Result;
use crate::services::AppServices;

/// Storage location and domain settings for the ledger.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub cap: i64,
    pub roll_source: RollSource,
}

impl AppConfig {
    pub fn new(db_path: PathBuf, roll_source: RollSource) -> Self {
        Self {
            db_path,
            cap: DEFAULT_CAP,
            roll_source,
        }
    }

    pub fn with_cap(mut self, cap: i64) -> Self {
        self.cap = cap;
        self
    }
}

/// Application state shared by the HTTP layer, the scheduler and the CLI.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    /// Migrates the store and seeds the first level record when it is empty.
    pub fn setup_db(&self) -> Result<LevelRecord> {
        self.services.ledger.initialize()
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}
