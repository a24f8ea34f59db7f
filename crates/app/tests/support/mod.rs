#![allow(dead_code)]

use blood_app::{AppConfig, AppPaths, AppState, ensure_app_data_dir};
use blood_core::{Embed, EmbedField, RollEvent, RollSource};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

pub const BOT_ID: &str = "642775025770037279";
pub const CHANNEL_ID: &str = "1339973204201963633";

pub struct TestApp {
    pub _dir: TempDir,
    pub state: AppState,
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid date")
}

/// App pointing at a store that has not been initialized yet.
pub fn setup_uninitialized(cap: i64) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = AppPaths::new(dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("data dir");
    let config =
        AppConfig::new(paths.db_path, RollSource::new(BOT_ID, CHANNEL_ID)).with_cap(cap);
    TestApp {
        _dir: dir,
        state: AppState::new(config),
    }
}

/// App seeded at `cap` with the last reset on `seeded_at`.
pub fn setup_app(cap: i64, seeded_at: DateTime<Utc>) -> TestApp {
    let app = setup_uninitialized(cap);
    app.state
        .services
        .ledger
        .initialize_at(seeded_at)
        .expect("initialize ledger");
    app
}

pub fn roll(text: &str) -> RollEvent {
    RollEvent {
        author_id: BOT_ID.to_string(),
        channel_id: CHANNEL_ID.to_string(),
        text: text.to_string(),
        embeds: Vec::new(),
    }
}

pub fn field_embed(value: &str) -> Embed {
    Embed {
        description: None,
        fields: vec![EmbedField {
            name: "Result".to_string(),
            value: value.to_string(),
        }],
    }
}
