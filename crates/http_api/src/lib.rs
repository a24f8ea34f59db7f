mod errors;
mod handlers;
mod middleware;
mod notify;
mod signature;
mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use errors::HttpError;
pub use notify::Notifier;
pub use signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, parse_public_key, verify_signature};
pub use state::{HttpState, generate_api_token};

/// Header carrying the shared token on the JSON API.
pub const TOKEN_HEADER: &str = "x-bloodkeeper-token";

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/level", post(handlers::level))
        .route("/set_level", post(handlers::set_level))
        .route("/history", post(handlers::history))
        .route("/roll_events", post(handlers::roll_events))
        .route("/reset_check", post(handlers::reset_check))
        .route("/status", post(handlers::status))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_token,
        ));

    let interactions = Router::new()
        .route("/interactions", post(handlers::interactions))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::verify_interaction,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .merge(interactions)
        .nest("/api", api)
        .with_state(state)
}
