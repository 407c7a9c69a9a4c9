//! Webhook delivery for outbound messages

use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::models::OutboundMessage;

/// Result of delivering one message
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    /// Whether the webhook accepted the message
    pub success: bool,
    /// Response status, if a response arrived
    pub status: Option<u16>,
    /// Failure description
    pub error: Option<String>,
    /// When the attempt started
    pub sent_at: DateTime<Utc>,
}

/// Posts outbound messages to the configured webhook.
///
/// Delivery is best effort: failures are logged and reported in the
/// [`DeliveryResult`], never retried.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: Url,
    debug: bool,
}

impl WebhookClient {
    /// Create a client around an existing HTTP client
    pub fn new(client: Client, url: Url, debug: bool) -> Self {
        Self { client, url, debug }
    }

    /// Build a client for the configured webhook
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("alertrelay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::new(client, config.webhook_url.clone(), config.debug))
    }

    /// Deliver messages one after another.
    ///
    /// A failed message does not stop the following ones.
    pub async fn deliver_all(&self, messages: &[OutboundMessage]) -> Vec<DeliveryResult> {
        let mut results = Vec::with_capacity(messages.len());

        for message in messages {
            results.push(self.deliver(message).await);
        }

        results
    }

    /// Deliver a single message
    pub async fn deliver(&self, message: &OutboundMessage) -> DeliveryResult {
        let sent_at = Utc::now();

        match self.post(message).await {
            Ok(status) => {
                debug!(status = status.as_u16(), embeds = message.units.len(), "Webhook delivered");
                DeliveryResult {
                    success: true,
                    status: Some(status.as_u16()),
                    error: None,
                    sent_at,
                }
            }
            Err(e) => {
                match &e {
                    DeliveryError::Status { status, body } => {
                        warn!(status = status.as_u16(), body = %body, "Discord server returned an error");
                    }
                    DeliveryError::Transport(_) | DeliveryError::Serialization(_) => {
                        error!(error = %e, "Failed to send webhook");
                    }
                }

                DeliveryResult {
                    success: false,
                    status: e.status().map(|s| s.as_u16()),
                    error: Some(e.to_string()),
                    sent_at,
                }
            }
        }
    }

    async fn post(&self, message: &OutboundMessage) -> std::result::Result<StatusCode, DeliveryError> {
        let body = encode(message).map_err(DeliveryError::Serialization)?;

        if self.debug {
            info!(payload = %String::from_utf8_lossy(&body), "Sending webhook");
        }

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status { status, body });
        }

        Ok(status)
    }
}

/// Delivery errors
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Connection, DNS or timeout failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The webhook answered with a 4xx or 5xx status
    #[error("webhook returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The message could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl DeliveryError {
    /// HTTP status, when the webhook answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Serialization(_) => None,
        }
    }
}

/// Serialize a message in Discord's webhook format
pub fn encode(message: &OutboundMessage) -> serde_json::Result<Vec<u8>> {
    let payload = DiscordPayload {
        content: &message.content,
        embeds: message
            .units
            .iter()
            .map(|unit| DiscordEmbed {
                title: &unit.title,
                description: &unit.body,
                color: unit.color.value(),
                fields: &[],
            })
            .collect(),
    };

    serde_json::to_vec(&payload)
}

// Discord payload types
#[derive(Debug, Serialize)]
struct DiscordPayload<'a> {
    content: &'a str,
    embeds: Vec<DiscordEmbed<'a>>,
}

#[derive(Debug, Serialize)]
struct DiscordEmbed<'a> {
    title: &'a str,
    description: &'a str,
    color: u32,
    fields: &'a [serde_json::Value],
}
