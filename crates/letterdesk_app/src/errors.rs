use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use desk_logging::{desk_error, desk_warn};
use thiserror::Error;

/// Errors surfaced by the browser routes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            AppError::Internal(_) => desk_error!("{}", self),
            _ => desk_warn!("{}", self),
        }
        (status, self.to_string()).into_response()
    }
}
