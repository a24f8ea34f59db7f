use axum::{
    extract::{Json, State},
    response::{Html, IntoResponse},
};

use app_api::{AppContext, Caller, HistoryRequest, Interaction, SetLevelRequest};
use blood_app::Result as AppResult;
use blood_core::RollEvent;

use crate::{errors::HttpError, state::HttpState};

const HEALTH_PAGE: &str = "<h1>🩸 Bloodkeeper is running</h1>\n\
<p>Status: ✅ Online</p>\n\
<p>Commands: /ping, /bloodlevel, /setblood, /bloodhistory</p>\n";

/// Runs a ledger call off the async runtime; SQLite may wait on its busy timeout.
async fn blocking<T, F>(state: &HttpState, f: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&AppContext) -> AppResult<T> + Send + 'static,
{
    let context = state.context.clone();
    let result = tokio::task::spawn_blocking(move || f(&context))
        .await
        .map_err(|err| HttpError::internal(&err.to_string()))?;
    Ok(result?)
}

pub async fn health() -> Html<&'static str> {
    Html(HEALTH_PAGE)
}

pub async fn interactions(
    State(state): State<HttpState>,
    Json(interaction): Json<Interaction>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, move |ctx| {
        app_api::handle_interaction(ctx, interaction)
    })
    .await?;
    Ok(Json(response))
}

pub async fn level(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, app_api::level).await?;
    Ok(Json(response))
}

pub async fn set_level(
    State(state): State<HttpState>,
    Json(req): Json<SetLevelRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, move |ctx| {
        app_api::set_level(ctx, Caller::admin(), req)
    })
    .await?;
    Ok(Json(response))
}

pub async fn history(
    State(state): State<HttpState>,
    Json(req): Json<HistoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, move |ctx| app_api::history(ctx, req)).await?;
    Ok(Json(response))
}

/// Feeds a relayed chat message through the gate and announces consumption.
pub async fn roll_events(
    State(state): State<HttpState>,
    Json(event): Json<RollEvent>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, move |ctx| Ok(app_api::roll_event(ctx, event))).await?;
    if let (Some(notifier), Some(reply)) = (&state.notifier, &response.reply) {
        notifier.post_in_background(reply.clone());
    }
    Ok(Json(response))
}

pub async fn reset_check(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, app_api::reset_check).await?;
    if let (Some(notifier), Some(notice)) = (&state.notifier, &response.notice) {
        notifier.post_in_background(notice.clone());
    }
    Ok(Json(response))
}

pub async fn status(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = blocking(&state, app_api::status).await?;
    Ok(Json(response))
}
