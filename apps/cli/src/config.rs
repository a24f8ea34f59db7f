use std::fs;
use std::path::{Path, PathBuf};

use blood_core::DEFAULT_CAP;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "bloodkeeper";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ROLL_BOT_ID: &str = "642775025770037279";
const DEFAULT_BLOOD_CHANNEL_ID: &str = "1339973204201963633";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub cap: i64,
    pub roll_bot_id: String,
    pub blood_channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Hex Ed25519 key that signs incoming slash-command interactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Explicit database file; only settable through `DB_PATH`.
    #[serde(skip)]
    pub db_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cap: DEFAULT_CAP,
            roll_bot_id: DEFAULT_ROLL_BOT_ID.to_string(),
            blood_channel_id: DEFAULT_BLOOD_CHANNEL_ID.to_string(),
            api_token: None,
            webhook_url: None,
            discord_public_key: None,
            data_dir: None,
            db_path: None,
        }
    }
}

impl CliConfig {
    /// Applies environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), String> {
        if let Some(value) = lookup("HTTP_PORT") {
            self.port = value
                .parse()
                .map_err(|_| format!("invalid HTTP_PORT value: {value}"))?;
        }
        if let Some(value) = lookup("DB_PATH") {
            self.db_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("ROLL_BOT_ID") {
            self.roll_bot_id = value;
        }
        if let Some(value) = lookup("BLOOD_CHANNEL_ID") {
            self.blood_channel_id = value;
        }
        if let Some(value) = lookup("BLOODKEEPER_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = lookup("BLOODKEEPER_WEBHOOK_URL") {
            self.webhook_url = Some(value);
        }
        if let Some(value) = lookup("DISCORD_PUBLIC_KEY") {
            self.discord_public_key = Some(value);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cap <= 0 {
            return Err(format!("cap must be positive, got {}", self.cap));
        }
        if self.roll_bot_id.is_empty() || self.blood_channel_id.is_empty() {
            return Err("roll_bot_id and blood_channel_id must be set".to_string());
        }
        if let Some(key) = &self.discord_public_key {
            http_api::parse_public_key(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create(path_override: Option<PathBuf>) -> Result<ConfigLoad, String> {
    let file = match path_override {
        Some(path) => path,
        None => config_dir()?.join(CONFIG_FILE_NAME),
    };
    load_or_create_at(file)
}

fn load_or_create_at(file: PathBuf) -> Result<ConfigLoad, String> {
    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }
    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents).map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return Ok(Path::new(&base).join(CONFIG_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
