use std::fmt::Display;

use anyhow;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Caller sent something we refuse to process. Rendered as a 400.
    InvalidInput(String),
    /// Body the JSON extractor could not accept. Keeps the extractor's status.
    Malformed(JsonRejection),
    Internal(anyhow::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidInput(detail) => write!(f, "Invalid input: {detail}"),
            AppError::Malformed(rejection) => write!(f, "Malformed request: {rejection}"),
            AppError::Internal(err) => write!(f, "{:?}", err),
        }
    }
}

pub type Result<T = (), E = AppError> = anyhow::Result<T, E>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::InvalidInput(detail) => (StatusCode::BAD_REQUEST, detail),
            AppError::Malformed(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Internal(err) => {
                tracing::error!("Something went wrong: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        return (status, Json(json!({ "detail": detail }))).into_response();
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
