//! Application startup and lifecycle management.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::services::{FcmClient, TokenStore};

/// Shared application state, constructed once and injected into every
/// handler. Both clients are safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: TokenStore,
    pub fcm: FcmClient,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Connect the store, build the FCM client, and bind the listener
    /// (port 0 binds a random port for tests).
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let store = TokenStore::connect(&config.mongodb.uri, &config.mongodb.database).await?;
        let fcm = FcmClient::new(config.fcm.clone());

        let state = AppState {
            config: config.clone(),
            store,
            fcm,
        };

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until a shutdown signal arrives, then release the store
    /// client.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let router = build_router(self.state.clone());

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.state.store.shutdown().await;

        Ok(())
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/send-token", post(handlers::send_token))
        .route("/send-notification", post(handlers::send_notification))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
