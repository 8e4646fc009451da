use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(anyhow::Error),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(anyhow::Error::new(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        AppError::InvalidBody
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
        }

        let (status, message, error) = match self {
            AppError::InvalidBody => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                None,
            ),
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(err.to_string()),
            ),
            AppError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save token".to_string(),
                Some(err.to_string()),
            ),
            AppError::Delivery(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send notification".to_string(),
                Some(err),
            ),
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}
