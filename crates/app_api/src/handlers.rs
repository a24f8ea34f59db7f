use blood_app::{AppError, GateDecision, HistoryParams, Result};
use blood_core::{HistoryEntry, LevelStatus, RollEvent, level_percentage};

use crate::{
    AppContext, Caller, HistoryRequest, LevelResponse, ResetCheckResponse,
    RollEventResponse, SetLevelRequest, StatusResponse, monthly_reset_notice, roll_reply,
};

fn level_response(level: i64, cap: i64) -> LevelResponse {
    LevelResponse {
        level,
        cap,
        percentage: level_percentage(level, cap),
        status: LevelStatus::from_level(level, cap),
    }
}

/// Rejects admin amounts outside `0..=cap` before they reach the ledger.
pub fn validate_amount(amount: Option<i64>, cap: i64) -> Result<i64> {
    match amount {
        Some(amount) if (0..=cap).contains(&amount) => Ok(amount),
        _ => Err(AppError::Validation(format!(
            "Please provide a value between 0 and {}.",
            cap
        ))),
    }
}

pub fn require_admin(caller: Caller) -> Result<()> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "You need administrator permissions to use this command.".to_string(),
        ))
    }
}

pub fn level(ctx: &AppContext) -> Result<LevelResponse> {
    let ledger = &ctx.app_state.services.ledger;
    let level = ledger.current_level()?;
    Ok(level_response(level, ledger.cap()))
}

pub fn set_level(ctx: &AppContext, caller: Caller, req: SetLevelRequest) -> Result<LevelResponse> {
    require_admin(caller)?;
    let ledger = &ctx.app_state.services.ledger;
    let amount = validate_amount(req.amount, ledger.cap())?;
    let level = ledger.set_level(amount)?;
    Ok(level_response(level, ledger.cap()))
}

pub fn history(ctx: &AppContext, req: HistoryRequest) -> Result<Vec<HistoryEntry>> {
    let params = HistoryParams { limit: req.limit };
    ctx.app_state
        .services
        .ledger
        .history(params.resolved_limit())
}

/// Runs an inbound chat message through the message gate. Never fails: ledger
/// errors come back as a `failed` decision.
pub fn roll_event(ctx: &AppContext, event: RollEvent) -> RollEventResponse {
    let cap = ctx.app_state.services.ledger.cap();
    match ctx.app_state.services.gate.handle(&event) {
        GateDecision::Dropped => RollEventResponse {
            decision: "dropped",
            outcome: None,
            reply: None,
            error: None,
        },
        GateDecision::NoSuccesses => RollEventResponse {
            decision: "no_successes",
            outcome: None,
            reply: None,
            error: None,
        },
        GateDecision::Consumed(outcome) => RollEventResponse {
            decision: "consumed",
            reply: Some(roll_reply(&outcome, cap)),
            outcome: Some(outcome),
            error: None,
        },
        GateDecision::Failed(message) => RollEventResponse {
            decision: "failed",
            outcome: None,
            reply: None,
            error: Some(message),
        },
    }
}

pub fn reset_check(ctx: &AppContext) -> Result<ResetCheckResponse> {
    let ledger = &ctx.app_state.services.ledger;
    let reset = ledger.check_and_reset_monthly()?;
    let level = ledger.current_level()?;
    Ok(ResetCheckResponse {
        reset,
        level,
        notice: reset.then(|| monthly_reset_notice(ledger.cap())),
    })
}

pub fn status(ctx: &AppContext) -> Result<StatusResponse> {
    let ledger = &ctx.app_state.services.ledger;
    let record = ledger.current_record()?;
    let db = ctx.app_state.open_db()?;
    Ok(StatusResponse {
        level: record.level,
        cap: ledger.cap(),
        last_reset: record.last_reset,
        history_count: db.history_count()?,
        db_path: ctx.app_state.config.db_path.to_string_lossy().to_string(),
        app_data_dir: ctx.app_data_dir.to_string_lossy().to_string(),
        legacy_backup_dir: ctx
            .legacy_backup_dir
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
    })
}
