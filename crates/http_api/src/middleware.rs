use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use ed25519_dalek::VerifyingKey;
use tracing::warn;

use crate::{
    TOKEN_HEADER,
    errors::HttpError,
    signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, verify_signature},
    state::HttpState,
};

const MAX_INTERACTION_BYTES: usize = 1024 * 1024;

pub async fn require_token(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());
    if token != Some(state.api_token.as_str()) {
        return Err(HttpError::unauthorized(
            "missing or invalid API token",
            "token_invalid",
        ));
    }

    Ok(next.run(req).await)
}

/// Interactions are signed by the chat platform when a public key is
/// configured; without one they fall back to the shared token.
pub async fn verify_interaction(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    match state.discord_key {
        Some(key) => {
            let req = check_signature(&key, req).await?;
            Ok(next.run(req).await)
        }
        None => require_token(State(state), req, next).await,
    }
}

async fn check_signature(key: &VerifyingKey, req: Request<Body>) -> Result<Request<Body>, HttpError> {
    let (signature, timestamp) = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    };
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return Err(HttpError::unauthorized(
            "missing request signature",
            "signature_invalid",
        ));
    };

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_INTERACTION_BYTES)
        .await
        .map_err(|_| HttpError::bad_request("unreadable request body", "invalid_body"))?;
    if !verify_signature(key, &signature, &timestamp, &bytes) {
        warn!("rejected interaction with a bad signature");
        return Err(HttpError::unauthorized(
            "invalid request signature",
            "signature_invalid",
        ));
    }
    Ok(Request::from_parts(parts, Body::from(bytes)))
}
