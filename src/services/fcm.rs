//! FCM v1 send API client.

use std::collections::HashMap;

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

use crate::config::FcmConfig;
use crate::error::AppError;

/// A notification to deliver to a single device token.
#[derive(Debug, Clone)]
pub struct PushMessage {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct FcmRequest {
    message: FcmMessage,
}

#[derive(Debug, Serialize)]
struct FcmMessage {
    token: String,
    notification: FcmNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct FcmNotification {
    title: String,
    body: String,
}

#[derive(Clone)]
pub struct FcmClient {
    client: Client,
    config: FcmConfig,
}

impl FcmClient {
    pub fn new(config: FcmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// POST the message to the configured send endpoint and return the
    /// upstream response body as parsed JSON.
    ///
    /// Any failure, transport-level or a non-success upstream status,
    /// surfaces as a delivery error carrying the raw error text. No
    /// retries; a duplicate call produces a duplicate send.
    pub async fn send(&self, push: &PushMessage) -> Result<Value, AppError> {
        let request = build_request(push);

        let url = format!(
            "{}/{}/messages:send",
            self.config.api_base_url, self.config.project_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.service_account_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to FCM: {}", e);
                AppError::Delivery(format!("Failed to connect to FCM: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read FCM response: {}", e);
            AppError::Delivery(format!("Failed to read FCM response: {}", e))
        })?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "FCM send failed");
            return Err(AppError::Delivery(format!(
                "FCM API returned error status {}: {}",
                status, body
            )));
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse FCM response: {}", e);
            AppError::Delivery(format!("Failed to parse FCM response: {}", e))
        })?;

        tracing::info!(token = %push.token, "Push notification sent via FCM");

        Ok(parsed)
    }
}

fn build_request(push: &PushMessage) -> FcmRequest {
    FcmRequest {
        message: FcmMessage {
            token: push.token.clone(),
            notification: FcmNotification {
                title: push.title.clone(),
                body: push.body.clone(),
            },
            data: push.data.clone(),
        },
    }
}
