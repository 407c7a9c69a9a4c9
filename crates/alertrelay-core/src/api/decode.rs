//! Classification of inbound request bodies

use std::borrow::Cow;

use crate::models::{AlertGroup, PrometheusAlert};

/// Bodies longer than this are truncated in the log
pub const PREVIEW_LIMIT: usize = 1024;

/// What an inbound body turned out to be
#[derive(Debug)]
pub enum Inbound {
    /// An Alertmanager notification
    Decoded(AlertGroup),
    /// Alerts posted straight from Prometheus
    Foreign(Vec<PrometheusAlert>),
    /// Anything else
    Unparseable(serde_json::Error),
}

/// Decode a body as an alert group, falling back to Prometheus's own format
pub fn decode(body: &[u8]) -> Inbound {
    let err = match serde_json::from_slice::<AlertGroup>(body) {
        Ok(group) => return Inbound::Decoded(group),
        Err(e) => e,
    };

    match serde_json::from_slice::<Vec<PrometheusAlert>>(body) {
        Ok(alerts) if !alerts.is_empty() => Inbound::Foreign(alerts),
        _ => Inbound::Unparseable(err),
    }
}

/// Loggable prefix of a body
pub fn preview(body: &[u8]) -> Cow<'_, str> {
    if body.len() > PREVIEW_LIMIT {
        Cow::Owned(format!(
            "{}...",
            String::from_utf8_lossy(&body[..PREVIEW_LIMIT - 1])
        ))
    } else {
        String::from_utf8_lossy(body)
    }
}
