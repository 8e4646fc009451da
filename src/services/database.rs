use mongodb::{
    bson::{doc, Document},
    options::UpdateOptions,
    Client as MongoClient, Collection, Database,
};

use crate::error::AppError;

/// MongoDB-backed store for device push tokens, one document per user.
#[derive(Clone)]
pub struct TokenStore {
    client: MongoClient,
    db: Database,
}

impl TokenStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::Database(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::Database(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection("users")
    }

    /// Merge-write the token into the user's document. Only `fcmToken`
    /// is set; any other fields on the document are left untouched.
    pub async fn save_token(&self, user_id: &str, token: &str) -> Result<(), AppError> {
        let options = UpdateOptions::builder().upsert(true).build();

        self.users()
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "fcmToken": token } },
                options,
            )
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, "Failed to save token: {}", e);
                AppError::Database(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(())
    }

    /// Release the underlying client. Called once at process exit.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
