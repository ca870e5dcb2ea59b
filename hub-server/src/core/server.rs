//! HTTP server bootstrap

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api;
use crate::core::config::Config;
use crate::core::state::ServerState;
use crate::utils::{AppError, AppResult};

/// HTTP server wrapping the shared state
pub struct Server {
    state: ServerState,
}

impl Server {
    /// Initialize state (work dir, database, services) from configuration
    pub async fn new(config: Config) -> AppResult<Self> {
        let state = ServerState::initialize(config).await?;
        Ok(Self { state })
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Serve until ctrl-c
    pub async fn run(self) -> AppResult<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let app = api::build_app(self.state.clone());

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        info!("HTTP server listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
}
