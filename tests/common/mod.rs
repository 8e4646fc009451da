use mongodb::bson::Document;
use mongodb::{Collection, Database};
use push_relay::config::{Config, FcmConfig, MongoConfig, ServerConfig};
use push_relay::startup::Application;
use secrecy::Secret;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub db: Database,
    pub db_name: String,
    /// Stand-in for the FCM send endpoint.
    pub fcm_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let fcm_server = MockServer::start().await;

        let mongo_uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("push_relay_test_{}", uuid::Uuid::new_v4());

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            mongodb: MongoConfig {
                uri: mongo_uri.clone(),
                database: db_name.clone(),
            },
            fcm: FcmConfig {
                project_id: "test-project".to_string(),
                service_account_key: Secret::new("test-key".to_string()),
                api_base_url: format!("{}/v1/projects", fcm_server.uri()),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Separate verification connection so tests can read and drop
        // the database directly.
        let mongo = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to test MongoDB");
        let db = mongo.database(&db_name);

        TestApp {
            address,
            db,
            db_name,
            fcm_server,
        }
    }

    pub fn users(&self) -> Collection<Document> {
        self.db.collection("users")
    }

    /// Path FCM requests arrive on, relative to the mock server root.
    pub fn fcm_send_path(&self) -> &'static str {
        "/v1/projects/test-project/messages:send"
    }

    /// Cleanup test database after test completes.
    pub async fn cleanup(&self) {
        self.db
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}
