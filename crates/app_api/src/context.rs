use std::path::PathBuf;

use blood_app::AppState;

#[derive(Clone)]
pub struct AppContext {
    pub app_state: AppState,
    pub app_data_dir: PathBuf,
    pub legacy_backup_dir: Option<PathBuf>,
}
