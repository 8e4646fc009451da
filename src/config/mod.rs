use std::env;
use std::fs;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::Secret;

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub fcm: FcmConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Clone, Debug)]
pub struct FcmConfig {
    pub project_id: String,
    /// Service account material loaded from `SERVICE_ACCOUNT_KEY_PATH`.
    pub service_account_key: Secret<String>,
    /// Base URL up to the project segment of the FCM v1 send endpoint.
    pub api_base_url: String,
}

impl Config {
    /// Load configuration from the environment, reading the service
    /// account key file once. Handlers never touch the environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = "0.0.0.0".to_string();
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let key_path =
            env::var("SERVICE_ACCOUNT_KEY_PATH").context("SERVICE_ACCOUNT_KEY_PATH not set")?;
        let service_account_key = fs::read_to_string(&key_path)
            .with_context(|| format!("Failed to read service account key at {}", key_path))?;

        let project_id = env::var("FIREBASE_PROJECT_ID").context("FIREBASE_PROJECT_ID not set")?;

        let mongo_uri =
            env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let mongo_database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| "push_relay".to_string());

        let api_base_url = env::var("FCM_API_URL")
            .unwrap_or_else(|_| "https://fcm.googleapis.com/v1/projects".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            mongodb: MongoConfig {
                uri: mongo_uri,
                database: mongo_database,
            },
            fcm: FcmConfig {
                project_id,
                service_account_key: Secret::new(service_account_key),
                api_base_url,
            },
        })
    }
}
