use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::API_NAME;
use crate::repository::RepositoryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The response carries only `message`; `source` is logged.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl AppError {
    pub fn storage(message: &'static str, source: RepositoryError) -> Self {
        AppError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Validation(msg) => {
                tracing::warn!("{} Validation error: {}", API_NAME, msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::warn!("{} Not found: {}", API_NAME, msg);
                msg
            }
            AppError::Storage { message, source } => {
                tracing::error!("{} {}: {}", API_NAME, message, source);
                message.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
