use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::services::PushMessage;
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "token must not be empty"))]
    pub token: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub message: String,
    /// Parsed upstream response body, echoed to the caller.
    pub response: Value,
}

/// Forward a notification request to FCM. Any delivery failure maps to
/// 500 regardless of the upstream status code.
pub async fn send_notification(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<SendNotificationRequest>, AppError>,
) -> Result<(StatusCode, Json<SendNotificationResponse>), AppError> {
    request.validate()?;

    let push = PushMessage {
        token: request.token,
        title: request.title,
        body: request.body,
        data: request.data,
    };

    let response = state.fcm.send(&push).await?;

    Ok((
        StatusCode::OK,
        Json(SendNotificationResponse {
            message: "Notification sent".to_string(),
            response,
        }),
    ))
}
