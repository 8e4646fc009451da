use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::startup::AppState;

/// Missing fields deserialize to empty strings so the validator, not
/// the deserializer, rejects them.
#[derive(Debug, Deserialize, Validate)]
pub struct SendTokenRequest {
    #[serde(rename = "userId", default)]
    #[validate(length(min = 1, message = "userId must not be empty"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "token must not be empty"))]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SendTokenResponse {
    pub message: String,
}

pub async fn send_token(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<SendTokenRequest>, AppError>,
) -> Result<(StatusCode, Json<SendTokenResponse>), AppError> {
    request.validate()?;

    state
        .store
        .save_token(&request.user_id, &request.token)
        .await?;

    tracing::info!(user_id = %request.user_id, "Registered push token");

    Ok((
        StatusCode::OK,
        Json(SendTokenResponse {
            message: "Token saved".to_string(),
        }),
    ))
}
