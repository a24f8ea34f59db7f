use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{AppError, Result};

const DB_FILE_NAME: &str = "bloodkeeper.sqlite";

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let db_path = app_data_dir.join(DB_FILE_NAME);
        Self {
            app_data_dir,
            db_path,
        }
    }

    /// Uses an explicit database file; its parent becomes the data dir.
    pub fn from_db_path(db_path: PathBuf) -> Self {
        let app_data_dir = db_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            app_data_dir,
            db_path,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}

/// Copies a database left behind by an earlier deployment into the data dir.
///
/// Nothing happens when the target database already exists or the legacy file
/// is missing. The legacy file is backed up next to the new database first.
pub fn migrate_legacy_storage(paths: &AppPaths, legacy_db: &Path) -> Result<Option<PathBuf>> {
    if paths.db_path.exists() || !legacy_db.exists() {
        return Ok(None);
    }
    if legacy_db == paths.db_path {
        return Ok(None);
    }
    let backup_dir = paths.app_data_dir.join(format!(
        "legacy-backup-{}",
        Utc::now().format("%Y%m%d%H%M%S")
    ));
    std::fs::create_dir_all(&backup_dir)?;
    let file_name = legacy_db
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| DB_FILE_NAME.into());
    std::fs::copy(legacy_db, backup_dir.join(file_name))
        .map_err(|err| AppError::Message(format!("backup legacy db: {}", err)))?;
    std::fs::copy(legacy_db, &paths.db_path)
        .map_err(|err| AppError::Message(format!("migrate legacy db: {}", err)))?;
    Ok(Some(backup_dir))
}
