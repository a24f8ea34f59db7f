use serde::{Deserialize, Serialize};

/// Ceiling and monthly reset target for the city blood level.
pub const DEFAULT_CAP: i64 = 200;

/// One appended snapshot of the blood level. The row with the highest id is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub id: i64,
    pub level: i64,
    pub last_reset: String,
    pub created_at: String,
}

/// One consumption event recorded after a parsed roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub successes: i64,
    pub resulting_level: i64,
    pub source_text: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

/// Inbound chat message as delivered by the gateway relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEvent {
    pub author_id: String,
    pub channel_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

/// Result of a roll that consumed blood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub successes: i64,
    pub new_level: i64,
    pub was_reset: bool,
}

/// The roll bot and channel whose messages count against the level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSource {
    pub bot_id: String,
    pub channel_id: String,
}

impl RollSource {
    pub fn new(bot_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            channel_id: channel_id.into(),
        }
    }

    pub fn matches(&self, event: &RollEvent) -> bool {
        event.author_id == self.bot_id && event.channel_id == self.channel_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    Healthy,
    Moderate,
    Critical,
}

impl LevelStatus {
    /// Above half the cap is healthy, above a quarter is moderate.
    pub fn from_level(level: i64, cap: i64) -> Self {
        if level * 2 > cap {
            Self::Healthy
        } else if level * 4 > cap {
            Self::Moderate
        } else {
            Self::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Moderate => "Moderate",
            Self::Critical => "Critical",
        }
    }
}

/// Rounded share of the cap, in percent.
pub fn level_percentage(level: i64, cap: i64) -> i64 {
    if cap <= 0 {
        return 0;
    }
    ((level as f64 / cap as f64) * 100.0).round() as i64
}

/// Levels at or below a tenth of the cap trigger the low-blood warning.
pub fn is_critically_low(level: i64, cap: i64) -> bool {
    level * 10 <= cap
}
