use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blood_app::{ApiError, AppError};
use tracing::error;

/// JSON error reply carrying an [`ApiError`] body; the status comes from the body.
#[derive(Debug)]
pub struct HttpError(ApiError);

impl HttpError {
    pub fn unauthorized(message: &str, code: &str) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, message, Some(code))
    }

    pub fn bad_request(message: &str, code: &str) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message, Some(code))
    }

    pub fn internal(message: &str) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }

    fn with_status(status: StatusCode, message: &str, code: Option<&str>) -> Self {
        Self(ApiError {
            status: status.as_u16(),
            message: message.to_string(),
            code: code.map(str::to_string),
        })
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        let body = ApiError::from(err);
        if body.status >= 500 {
            error!(status = body.status, error = %body.message, "request failed");
        }
        Self(body)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0)).into_response()
    }
}
