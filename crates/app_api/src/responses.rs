use blood_core::{LevelStatus, RollOutcome};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LevelResponse {
    pub level: i64,
    pub cap: i64,
    pub percentage: i64,
    pub status: LevelStatus,
}

#[derive(Debug, Serialize)]
pub struct RollEventResponse {
    /// `dropped`, `no_successes`, `consumed` or `failed`.
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RollOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetCheckResponse {
    pub reset: bool,
    pub level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub level: i64,
    pub cap: i64,
    pub last_reset: String,
    pub history_count: u64,
    pub db_path: String,
    pub app_data_dir: String,
    pub legacy_backup_dir: Option<String>,
}
