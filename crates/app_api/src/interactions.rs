//! Slash-command interactions posted by the chat platform.

use blood_app::{AppError, DEFAULT_HISTORY_LIMIT, HISTORY_DISPLAY_LIMIT, Result};
use blood_core::LevelStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::{
    AppContext, Caller, HistoryRequest, SetLevelRequest, history_line, level_line, status_color,
    status_label,
};

pub const INTERACTION_PING: u8 = 1;
pub const INTERACTION_APPLICATION_COMMAND: u8 = 2;

const RESPONSE_PONG: u8 = 1;
const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
const FLAG_EPHEMERAL: u64 = 64;
const PERMISSION_ADMINISTRATOR: u64 = 0x8;
const HISTORY_COLOR: u32 = 0x8b0000;

#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<InteractionMember>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl InteractionData {
    fn option(&self, name: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| option.value.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionMember {
    /// Permission bitfield, serialised as a decimal string.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl InteractionMember {
    pub fn is_admin(&self) -> bool {
        self.permissions
            .as_deref()
            .and_then(|bits| bits.parse::<u64>().ok())
            .is_some_and(|bits| bits & PERMISSION_ADMINISTRATOR == PERMISSION_ADMINISTRATOR)
    }
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Default, Serialize)]
pub struct MessageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<MessageEmbed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

#[derive(Debug, Default, Serialize)]
pub struct MessageEmbed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<MessageEmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Serialize)]
pub struct MessageEmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    pub fn message(data: MessageData) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(data),
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self::message(MessageData {
            content: Some(content.into()),
            ..MessageData::default()
        })
    }

    /// Reply visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::message(MessageData {
            content: Some(content.into()),
            flags: Some(FLAG_EPHEMERAL),
            ..MessageData::default()
        })
    }
}

/// Answers a ping or dispatches a slash command. Command failures become
/// ephemeral replies; only malformed interactions are errors.
pub fn handle_interaction(ctx: &AppContext, interaction: Interaction) -> Result<InteractionResponse> {
    match interaction.kind {
        INTERACTION_PING => Ok(InteractionResponse::pong()),
        INTERACTION_APPLICATION_COMMAND => {
            let data = interaction
                .data
                .ok_or_else(|| AppError::Validation("missing command data".to_string()))?;
            let caller = Caller {
                is_admin: interaction
                    .member
                    .as_ref()
                    .is_some_and(InteractionMember::is_admin),
            };
            Ok(dispatch_command(ctx, &data, caller))
        }
        other => Err(AppError::Validation(format!(
            "unknown interaction type {}",
            other
        ))),
    }
}

fn dispatch_command(ctx: &AppContext, data: &InteractionData, caller: Caller) -> InteractionResponse {
    let result = match data.name.as_str() {
        "ping" => Ok(InteractionResponse::content(
            "🏓 Pong! Bot is responding successfully!",
        )),
        "bloodlevel" => blood_level_message(ctx),
        "setblood" => set_blood_message(ctx, caller, data),
        "bloodhistory" => blood_history_message(ctx),
        _ => Ok(InteractionResponse::ephemeral("❌ Unknown command")),
    };
    result.unwrap_or_else(|err| error_message(&data.name, err))
}

fn error_message(command: &str, err: AppError) -> InteractionResponse {
    match err {
        AppError::Validation(message) | AppError::Unauthorized(message) => {
            InteractionResponse::ephemeral(format!("❌ {}", message))
        }
        other => {
            error!(command, error = %other, "command failed");
            InteractionResponse::ephemeral(
                "❌ An error occurred while processing your command. Please try again.",
            )
        }
    }
}

fn blood_level_message(ctx: &AppContext) -> Result<InteractionResponse> {
    let level = crate::level(ctx)?;
    let status = LevelStatus::from_level(level.level, level.cap);
    Ok(InteractionResponse::message(MessageData {
        content: Some(level_line(level.level, level.cap)),
        embeds: vec![MessageEmbed {
            color: Some(status_color(status)),
            fields: vec![
                MessageEmbedField {
                    name: "📊 Status".to_string(),
                    value: status_label(status),
                    inline: true,
                },
                MessageEmbedField {
                    name: "📈 Percentage".to_string(),
                    value: format!("{}%", level.percentage),
                    inline: true,
                },
            ],
            footer: Some(EmbedFooter {
                text: format!("Blood resets monthly to {}", level.cap),
            }),
            ..MessageEmbed::default()
        }],
        ..MessageData::default()
    }))
}

fn set_blood_message(
    ctx: &AppContext,
    caller: Caller,
    data: &InteractionData,
) -> Result<InteractionResponse> {
    let amount = data.option("amount").and_then(Value::as_i64);
    let level = crate::set_level(ctx, caller, SetLevelRequest { amount })?;
    Ok(InteractionResponse::content(format!(
        "✅ Blood level set to **{}**",
        level.level
    )))
}

fn blood_history_message(ctx: &AppContext) -> Result<InteractionResponse> {
    let entries = crate::history(
        ctx,
        HistoryRequest {
            limit: Some(DEFAULT_HISTORY_LIMIT),
        },
    )?;
    if entries.is_empty() {
        return Ok(InteractionResponse::content(
            "📊 No blood consumption history yet.",
        ));
    }
    let shown: Vec<String> = entries
        .iter()
        .take(HISTORY_DISPLAY_LIMIT)
        .map(history_line)
        .collect();
    Ok(InteractionResponse::message(MessageData {
        embeds: vec![MessageEmbed {
            title: Some("📊 Recent Blood Consumption".to_string()),
            description: Some(shown.join("\n")),
            color: Some(HISTORY_COLOR),
            footer: Some(EmbedFooter {
                text: format!("Showing last {} entries", shown.len()),
            }),
            ..MessageEmbed::default()
        }],
        ..MessageData::default()
    }))
}
