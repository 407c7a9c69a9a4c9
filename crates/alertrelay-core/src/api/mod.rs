//! HTTP ingress
//!
//! Receives Alertmanager webhooks and hands them to the relay pipeline.

pub mod decode;
pub mod handlers;
pub mod routes;

pub use decode::{decode, Inbound};
pub use handlers::AppState;
pub use routes::create_router;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::{Error, Result};

/// HTTP ingress server
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind `addr` and serve until Ctrl-C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = create_router(self.state);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::internal(format!("Failed to listen on {addr}: {e}")))?;

        info!("Listening on: {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
}
