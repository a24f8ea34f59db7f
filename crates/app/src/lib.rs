pub mod app;
pub mod config;
pub mod error;
pub mod schedule;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::{DEFAULT_HISTORY_LIMIT, HISTORY_DISPLAY_LIMIT, HistoryParams};
pub use error::{ApiError, AppError, Result};
pub use schedule::{next_monthly_check, until_next_check};
pub use services::{AppServices, BloodLedger, GateDecision, MessageGate};
pub use startup::{AppPaths, ensure_app_data_dir, migrate_legacy_storage};
pub use util::time::months_between;
