//! Relay pipeline
//!
//! Takes a decoded alert group through rendering, batching and delivery.
//! Everything here is request-scoped; the pipeline itself only holds
//! read-only configuration and a shared HTTP client.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::delivery::{DeliveryResult, WebhookClient};
use crate::models::{AlertGroup, OutboundMessage, MAX_UNITS_PER_MESSAGE};
use crate::render::{batch, header, AlertRenderer};

/// Processing pipeline for alert groups
#[derive(Debug, Clone)]
pub struct Pipeline {
    renderer: AlertRenderer,
    client: WebhookClient,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(config: &Config, client: WebhookClient) -> Self {
        Self {
            renderer: AlertRenderer::new(config.timezone),
            client,
        }
    }

    /// Render and batch a group without sending anything
    pub fn prepare(&self, group: &AlertGroup) -> Vec<OutboundMessage> {
        let units = group
            .alerts
            .iter()
            .map(|alert| self.renderer.render(alert))
            .collect();

        batch(&header(group), units, MAX_UNITS_PER_MESSAGE)
    }

    /// Render, batch and deliver a group
    pub async fn relay(&self, group: &AlertGroup) -> Vec<DeliveryResult> {
        let messages = self.prepare(group);
        debug!(
            receiver = %group.receiver,
            alerts = group.alerts.len(),
            messages = messages.len(),
            "Relaying alert group"
        );

        let results = self.client.deliver_all(&messages).await;

        let failed = results.iter().filter(|r| !r.success).count();
        if failed > 0 {
            warn!(receiver = %group.receiver, failed, total = results.len(), "Some messages were not delivered");
        } else {
            info!(receiver = %group.receiver, alerts = group.alerts.len(), "Alert group relayed");
        }

        results
    }

    /// Tell the channel that the relay is being fed the wrong payloads
    pub async fn warn_misconfigured(&self) -> DeliveryResult {
        self.client
            .deliver(&OutboundMessage::misconfiguration_warning())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayTimezone;
    use crate::models::EmbedColor;

    fn pipeline() -> Pipeline {
        let config = Config::new("http://127.0.0.1:1/api/webhooks/1/token")
            .unwrap()
            .with_timezone(DisplayTimezone::Named(chrono_tz::UTC));
        let client = WebhookClient::new(reqwest::Client::new(), config.webhook_url.clone(), false);
        Pipeline::new(&config, client)
    }

    fn group(statuses: &[&str]) -> AlertGroup {
        let alerts: Vec<serde_json::Value> = statuses
            .iter()
            .map(|status| {
                serde_json::json!({
                    "status": status,
                    "startsAt": "2024-01-01T10:00:00Z",
                    "endsAt": "2024-01-01T10:30:00Z",
                    "labels": {"severity": "warning"},
                    "annotations": {"summary": "load", "description": "high load"}
                })
            })
            .collect();

        serde_json::from_value(serde_json::json!({
            "receiver": "ops",
            "status": "firing",
            "groupLabels": {"alertname": "HighLoad"},
            "alerts": alerts
        }))
        .unwrap()
    }

    #[test]
    fn test_prepare_keeps_alert_order() {
        let messages = pipeline().prepare(&group(&["firing", "resolved", "firing"]));

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "=== Alert: ops - HighLoad ===");
        let colors: Vec<EmbedColor> = messages[0].units.iter().map(|u| u.color).collect();
        assert_eq!(colors, vec![EmbedColor::Orange, EmbedColor::Green, EmbedColor::Orange]);
    }

    #[test]
    fn test_prepare_splits_large_groups() {
        let statuses = vec!["firing"; 21];
        let messages = pipeline().prepare(&group(&statuses));

        let sizes: Vec<usize> = messages.iter().map(|m| m.units.len()).collect();
        assert_eq!(sizes, vec![10, 10, 1]);
    }

    #[test]
    fn test_prepare_empty_group() {
        let messages = pipeline().prepare(&group(&[]));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].units.is_empty());
    }

    #[tokio::test]
    async fn test_relay_attempts_every_message() {
        let statuses = vec!["firing"; 11];
        let results = pipeline().relay(&group(&statuses)).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.success));
    }
}
