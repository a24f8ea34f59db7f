use blood_core::{HistoryEntry, LevelStatus, RollOutcome, is_critically_low, level_percentage};
use blood_db::parse_timestamp;

pub fn level_line(level: i64, cap: i64) -> String {
    format!(
        "🩸 **Current City Blood Level**: {}/{} ({}%)",
        level,
        cap,
        level_percentage(level, cap)
    )
}

pub fn status_label(status: LevelStatus) -> String {
    let icon = match status {
        LevelStatus::Healthy => "✅",
        LevelStatus::Moderate => "⚠️",
        LevelStatus::Critical => "🚨",
    };
    format!("{} {}", icon, status.label())
}

pub fn status_color(status: LevelStatus) -> u32 {
    match status {
        LevelStatus::Healthy => 0x00ff00,
        LevelStatus::Moderate => 0xffff00,
        LevelStatus::Critical => 0xff0000,
    }
}

/// Channel message announcing a consumed roll.
pub fn roll_reply(outcome: &RollOutcome, cap: i64) -> String {
    let mut reply = format!(
        "🩸 **Blood consumed!** {} successes detected.\n**New city blood level**: {}/{}",
        outcome.successes, outcome.new_level, cap
    );
    if outcome.was_reset {
        reply.push_str(&format!(
            "\n✨ **Monthly reset** - Blood level restored to {}!",
            cap
        ));
    }
    if is_critically_low(outcome.new_level, cap) {
        reply.push_str("\n🚨 **WARNING**: City blood level is critically low!");
    }
    reply
}

pub fn monthly_reset_notice(cap: i64) -> String {
    format!("🗓️ **Monthly Reset**: City blood level restored to {}!", cap)
}

pub fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "• {}: Consumed **{}** → Level **{}**",
        display_time(&entry.timestamp),
        entry.successes,
        entry.resulting_level
    )
}

fn display_time(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Ok(parsed) => parsed.format("%b %-d, %I:%M %p").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
