use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage failure: {0}")]
    Storage(#[from] blood_db::DbError),
    #[error("blood ledger is not initialized")]
    NotInitialized,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match err {
            AppError::Validation(_) => (400, Some("invalid_input".to_string())),
            AppError::Unauthorized(_) => (403, Some("unauthorized".to_string())),
            AppError::NotInitialized => (503, Some("not_initialized".to_string())),
            AppError::Storage(_) | AppError::Io(_) | AppError::Message(_) => (500, None),
        };
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}
