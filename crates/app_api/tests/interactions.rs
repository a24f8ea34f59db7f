use app_api::{
    AppContext, Caller, HistoryRequest, Interaction, SetLevelRequest, handle_interaction,
};
use blood_app::{AppConfig, AppError, AppState};
use blood_core::{RollEvent, RollSource};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

const BOT_ID: &str = "642775025770037279";
const CHANNEL_ID: &str = "1339973204201963633";

fn setup_context(seed: bool) -> (TempDir, AppContext) {
    let dir = tempdir().expect("temp dir");
    let config = AppConfig::new(
        dir.path().join("bloodkeeper.sqlite"),
        RollSource::new(BOT_ID, CHANNEL_ID),
    );
    let app_state = AppState::new(config);
    if seed {
        app_state.setup_db().expect("setup db");
    }
    let ctx = AppContext {
        app_state,
        app_data_dir: dir.path().to_path_buf(),
        legacy_backup_dir: None,
    };
    (dir, ctx)
}

fn command(name: &str, options: Value, permissions: &str) -> Interaction {
    serde_json::from_value(json!({
        "type": 2,
        "data": {"name": name, "options": options},
        "member": {"permissions": permissions},
    }))
    .expect("interaction")
}

fn respond(ctx: &AppContext, interaction: Interaction) -> Value {
    let response = handle_interaction(ctx, interaction).expect("response");
    serde_json::to_value(response).expect("json")
}

fn roll(text: &str) -> RollEvent {
    RollEvent {
        author_id: BOT_ID.to_string(),
        channel_id: CHANNEL_ID.to_string(),
        text: text.to_string(),
        embeds: Vec::new(),
    }
}

#[test]
fn ping_interaction_gets_pong() {
    let (_dir, ctx) = setup_context(true);
    let interaction: Interaction = serde_json::from_value(json!({"type": 1})).expect("ping");
    assert_eq!(respond(&ctx, interaction), json!({"type": 1}));
}

#[test]
fn unsupported_interaction_type_is_rejected() {
    let (_dir, ctx) = setup_context(true);
    let interaction: Interaction = serde_json::from_value(json!({"type": 3})).expect("parse");
    assert!(matches!(
        handle_interaction(&ctx, interaction),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn ping_command_replies_publicly() {
    let (_dir, ctx) = setup_context(true);
    let value = respond(&ctx, command("ping", json!([]), "0"));
    assert_eq!(value["type"], 4);
    assert!(value["data"]["content"].as_str().expect("content").contains("Pong"));
    assert!(value["data"].get("flags").is_none());
}

#[test]
fn bloodlevel_shows_status_embed() {
    let (_dir, ctx) = setup_context(true);
    let value = respond(&ctx, command("bloodlevel", json!([]), "0"));
    assert_eq!(
        value["data"]["content"],
        "🩸 **Current City Blood Level**: 200/200 (100%)"
    );
    let embed = &value["data"]["embeds"][0];
    assert_eq!(embed["color"], 0x00ff00);
    assert_eq!(embed["fields"][0]["value"], "✅ Healthy");
    assert_eq!(embed["fields"][1]["value"], "100%");
    assert_eq!(embed["footer"]["text"], "Blood resets monthly to 200");
}

#[test]
fn setblood_requires_administrator() {
    let (_dir, ctx) = setup_context(true);
    let value = respond(&ctx, command("setblood", json!([{"name": "amount", "value": 50}]), "0"));
    assert_eq!(value["data"]["flags"], 64);
    assert!(
        value["data"]["content"]
            .as_str()
            .expect("content")
            .contains("administrator")
    );
    assert_eq!(app_api::level(&ctx).expect("level").level, 200);
}

#[test]
fn setblood_validates_range() {
    let (_dir, ctx) = setup_context(true);
    for amount in [json!(-1), json!(201), json!("lots")] {
        let value = respond(
            &ctx,
            command("setblood", json!([{"name": "amount", "value": amount}]), "8"),
        );
        assert_eq!(value["data"]["flags"], 64, "{amount}");
    }
    let missing = respond(&ctx, command("setblood", json!([]), "8"));
    assert_eq!(missing["data"]["flags"], 64);
    assert_eq!(app_api::level(&ctx).expect("level").level, 200);
}

#[test]
fn admin_setblood_updates_level() {
    let (_dir, ctx) = setup_context(true);
    let value = respond(
        &ctx,
        command("setblood", json!([{"name": "amount", "value": 30}]), "8"),
    );
    assert_eq!(value["data"]["content"], "✅ Blood level set to **30**");

    let level = respond(&ctx, command("bloodlevel", json!([]), "0"));
    let embed = &level["data"]["embeds"][0];
    assert_eq!(embed["color"], 0xff0000);
    assert_eq!(embed["fields"][0]["value"], "🚨 Critical");
}

#[test]
fn bloodhistory_lists_recent_consumption() {
    let (_dir, ctx) = setup_context(true);
    let empty = respond(&ctx, command("bloodhistory", json!([]), "0"));
    assert_eq!(
        empty["data"]["content"],
        "📊 No blood consumption history yet."
    );

    for successes in 1..=7 {
        let response = app_api::roll_event(&ctx, roll(&format!("{} successes", successes)));
        assert_eq!(response.decision, "consumed");
    }
    let value = respond(&ctx, command("bloodhistory", json!([]), "0"));
    let embed = &value["data"]["embeds"][0];
    assert_eq!(embed["title"], "📊 Recent Blood Consumption");
    assert_eq!(embed["footer"]["text"], "Showing last 5 entries");
    let lines: Vec<&str> = embed["description"]
        .as_str()
        .expect("description")
        .lines()
        .collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("Consumed **7**"));
    assert!(lines[0].contains("Level **172**"));
}

#[test]
fn unknown_command_is_ephemeral() {
    let (_dir, ctx) = setup_context(true);
    let value = respond(&ctx, command("summon", json!([]), "8"));
    assert_eq!(value["data"]["flags"], 64);
    assert_eq!(value["data"]["content"], "❌ Unknown command");
}

#[test]
fn storage_failures_become_generic_replies() {
    let (_dir, ctx) = setup_context(false);
    let value = respond(&ctx, command("bloodlevel", json!([]), "0"));
    assert_eq!(value["data"]["flags"], 64);
    assert!(
        value["data"]["content"]
            .as_str()
            .expect("content")
            .contains("An error occurred")
    );
}

#[test]
fn json_handlers_share_the_ledger() {
    let (_dir, ctx) = setup_context(true);
    assert!(matches!(
        app_api::set_level(&ctx, Caller::member(), SetLevelRequest { amount: Some(10) }),
        Err(AppError::Unauthorized(_))
    ));
    let level = app_api::set_level(&ctx, Caller::admin(), SetLevelRequest { amount: Some(120) })
        .expect("set level");
    assert_eq!(level.level, 120);
    assert_eq!(level.percentage, 60);

    let dropped = app_api::roll_event(
        &ctx,
        RollEvent {
            author_id: "someone-else".to_string(),
            ..roll("9 successes")
        },
    );
    assert_eq!(dropped.decision, "dropped");
    let quiet = app_api::roll_event(&ctx, roll("the dice roll off the table"));
    assert_eq!(quiet.decision, "no_successes");

    let consumed = app_api::roll_event(&ctx, roll("Total successes: 4"));
    assert_eq!(consumed.decision, "consumed");
    assert!(consumed.reply.expect("reply").contains("116/200"));

    let history = app_api::history(&ctx, HistoryRequest::default()).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].resulting_level, 116);

    let reset = app_api::reset_check(&ctx).expect("reset check");
    assert!(!reset.reset);
    assert_eq!(reset.level, 116);

    let status = app_api::status(&ctx).expect("status");
    assert_eq!(status.history_count, 1);
    assert_eq!(status.cap, 200);
}

#[test]
fn uninitialized_roll_reports_failure() {
    let (_dir, ctx) = setup_context(false);
    let response = app_api::roll_event(&ctx, roll("3 successes"));
    assert_eq!(response.decision, "failed");
    assert!(response.error.is_some());
}
