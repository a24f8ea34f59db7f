use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "bloodkeeper";
/// Where the earlier deployment kept its database, relative to the working directory.
pub const LEGACY_DB_PATH: &str = "data/bloodkeeper.db";

pub fn resolve_data_dir() -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return Ok(Path::new(&base).join(DATA_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}
