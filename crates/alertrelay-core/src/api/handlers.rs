//! Ingress handler for alert router webhooks

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::HOST, HeaderMap, Method, StatusCode, Uri},
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::MISCONFIGURATION_TEXT;
use crate::pipeline::Pipeline;

use super::decode::{decode, preview, Inbound};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Render, batch and deliver pipeline
    pub pipeline: Arc<Pipeline>,
    /// Read-only relay configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create the state from configuration and a pipeline
    pub fn new(config: Arc<Config>, pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline, config }
    }
}

/// Receive a webhook on any method and path.
///
/// Always answers `200 OK` with an empty body so the sender never queues a
/// retry because of something the relay could not handle.
pub async fn receive(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    info!(%host, %method, %uri, bytes = body.len(), "Inbound request");

    if state.config.debug {
        info!(payload = %String::from_utf8_lossy(&body), "Received webhook");
    }

    match decode(&body) {
        Inbound::Decoded(group) => {
            state.pipeline.relay(&group).await;
        }
        Inbound::Foreign(alerts) => {
            warn!(r"/!\ -- You have misconfigured this software -- /!\");
            warn!(alerts = alerts.len(), "Received alerts straight from Prometheus");
            warn!("{MISCONFIGURATION_TEXT}");
            state.pipeline.warn_misconfigured().await;
        }
        Inbound::Unparseable(e) => {
            warn!(error = %e, "Failed to unpack inbound alert request - {}", preview(&body));
        }
    }

    StatusCode::OK
}
