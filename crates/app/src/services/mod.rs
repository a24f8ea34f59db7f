mod gate;
mod ledger;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use blood_db::Db;

pub use gate::{GateDecision, MessageGate};
pub use ledger::BloodLedger;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub ledger: BloodLedger,
    pub gate: MessageGate,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        let ledger = BloodLedger::new(shared.clone());
        Self {
            gate: MessageGate::new(shared, ledger.clone()),
            ledger,
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
