//! Inbound alert data models
//!
//! These mirror the JSON that Alertmanager posts to a webhook receiver.
//! Only `receiver`, `status` and `alerts` are required at the group level.
//! Every other field degrades to an empty value when absent.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Label holding the severity used to pick a color
pub const SEVERITY_LABEL: &str = "severity";

/// Label group name used in the message header
pub const ALERTNAME_LABEL: &str = "alertname";

/// Prefix of labels reserved for the auxiliary metric
pub const METRICS_LABEL_PREFIX: &str = "metrics_";

/// Label carrying the auxiliary metric's raw value
pub const METRICS_VALUE_LABEL: &str = "metrics_value";

/// Label carrying the auxiliary metric's conversion hint
pub const METRICS_CONV_LABEL: &str = "metrics_conv";

/// Label that is never rendered
pub const SUPPRESSED_LABEL: &str = "value";

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch
const ZERO_TIME_UNIX_SECONDS: i64 = -62_135_596_800;

/// Status of an alert or alert group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertStatus {
    /// The condition is active
    Firing,
    /// The condition has cleared
    Resolved,
    /// Anything else the router sent
    Other(String),
}

impl AlertStatus {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Firing => "firing",
            Self::Resolved => "resolved",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for AlertStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for AlertStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "firing" => Self::Firing,
            "resolved" => Self::Resolved,
            _ => Self::Other(raw),
        }
    }
}

impl From<AlertStatus> for String {
    fn from(status: AlertStatus) -> Self {
        match status {
            AlertStatus::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

/// One notification batch from the alert router
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertGroup {
    /// Name of the receiver that routed this group
    pub receiver: String,

    /// Overall group status
    pub status: AlertStatus,

    /// Individual alerts, in router order
    pub alerts: Vec<Alert>,

    /// Labels the group was formed on
    #[serde(default)]
    pub group_labels: BTreeMap<String, String>,

    /// Labels shared by every alert in the group
    #[serde(default)]
    pub common_labels: BTreeMap<String, String>,

    /// Annotations shared by every alert in the group
    #[serde(default)]
    pub common_annotations: BTreeMap<String, String>,

    /// Link back to the alert router
    #[serde(default, rename = "externalURL")]
    pub external_url: String,

    /// Key identifying the group
    #[serde(default)]
    pub group_key: String,

    /// Payload schema version
    #[serde(default)]
    pub version: String,
}

impl AlertGroup {
    /// The `alertname` group label, or an empty string
    pub fn alert_name(&self) -> &str {
        self.group_labels
            .get(ALERTNAME_LABEL)
            .map_or("", String::as_str)
    }
}

/// Annotations attached to an alert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotations {
    /// One-line summary, used in the message title
    #[serde(default)]
    pub summary: String,

    /// Free-form, possibly multi-line description
    #[serde(default)]
    pub description: String,
}

/// One alert instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Firing or resolved
    #[serde(default)]
    pub status: AlertStatus,

    /// RFC 3339 start time
    #[serde(default)]
    pub starts_at: String,

    /// RFC 3339 end time. Alertmanager sends the zero time while firing.
    #[serde(default)]
    pub ends_at: String,

    /// Link to the expression that produced the alert
    #[serde(default, rename = "generatorURL")]
    pub generator_url: String,

    /// Identifying labels, including the reserved metric labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Human-facing annotation text
    #[serde(default)]
    pub annotations: Annotations,
}

impl Alert {
    /// Value of the `severity` label, if any
    pub fn severity(&self) -> Option<&str> {
        self.labels.get(SEVERITY_LABEL).map(String::as_str)
    }

    /// Parsed start time, or the zero time when malformed
    pub fn start_time(&self) -> DateTime<Utc> {
        parse_timestamp("startsAt", &self.starts_at)
    }

    /// Parsed end time, or the zero time when absent or malformed
    pub fn end_time(&self) -> DateTime<Utc> {
        parse_timestamp("endsAt", &self.ends_at)
    }

    /// Labels that are shown to the reader, in key order.
    ///
    /// Reserved `metrics_*` labels and the `value` label are left out.
    pub fn display_labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .filter(|(key, _)| {
                !key.starts_with(METRICS_LABEL_PREFIX) && key.as_str() != SUPPRESSED_LABEL
            })
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Auxiliary metric carried in the reserved labels.
    ///
    /// A missing or unparsable value is `0.0`; a missing hint is plain decimal.
    pub fn auxiliary_metric(&self) -> AuxiliaryMetric {
        let value = match self.labels.get(METRICS_VALUE_LABEL) {
            Some(raw) => raw.trim().parse::<f64>().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "Unparsable metrics_value label, using 0");
                0.0
            }),
            None => 0.0,
        };

        let conversion = self
            .labels
            .get(METRICS_CONV_LABEL)
            .map_or(Conversion::Decimal, |tag| Conversion::from_tag(tag));

        AuxiliaryMetric { value, conversion }
    }
}

/// Measurement attached to an alert through reserved labels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AuxiliaryMetric {
    /// Raw numeric value
    pub value: f64,
    /// How to present the value
    pub conversion: Conversion,
}

/// Presentation hint for an auxiliary metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conversion {
    /// Seconds, shown as an elapsed time
    Duration,
    /// Unix epoch seconds, shown as a date and time
    Timestamp,
    /// `1` is up, anything else is down
    UpDown,
    /// Two-decimal number
    #[default]
    Decimal,
}

impl Conversion {
    /// Parse a `metrics_conv` tag. Unknown tags are plain decimal.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "duration" => Self::Duration,
            "timestamp" => Self::Timestamp,
            "updown" => Self::UpDown,
            _ => Self::Decimal,
        }
    }
}

/// One alert in the format Prometheus pushes to Alertmanager.
///
/// Receiving these means Prometheus was pointed at the relay directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusAlert {
    /// Identifying labels
    pub labels: BTreeMap<String, String>,

    /// Annotation text
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    /// Start time
    #[serde(default)]
    pub starts_at: Option<String>,

    /// End time
    #[serde(default)]
    pub ends_at: Option<String>,

    /// Link to the producing expression
    #[serde(default, rename = "generatorURL")]
    pub generator_url: Option<String>,
}

/// The zero instant used for missing or malformed timestamps
pub fn zero_time() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_UNIX_SECONDS, 0).unwrap_or_default()
}

fn parse_timestamp(field: &str, raw: &str) -> DateTime<Utc> {
    if raw.is_empty() {
        return zero_time();
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(e) => {
            warn!(field, value = %raw, error = %e, "Malformed timestamp, using zero time");
            zero_time()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alert_with_labels(labels: &[(&str, &str)]) -> Alert {
        Alert {
            status: AlertStatus::Firing,
            labels: labels
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..Alert::default()
        }
    }

    #[test]
    fn test_status_from_wire() {
        assert_eq!(AlertStatus::from("firing".to_string()), AlertStatus::Firing);
        assert_eq!(AlertStatus::from("resolved".to_string()), AlertStatus::Resolved);
        assert_eq!(
            AlertStatus::from("pending".to_string()),
            AlertStatus::Other("pending".to_string())
        );
        assert_eq!(AlertStatus::Other("pending".to_string()).as_str(), "pending");
    }

    #[test]
    fn test_decode_alertmanager_group() {
        let raw = r#"{
            "receiver": "discord",
            "status": "firing",
            "externalURL": "http://alertmanager:9093",
            "groupKey": "{}:{alertname=\"DiskFull\"}",
            "version": "4",
            "groupLabels": {"alertname": "DiskFull"},
            "commonLabels": {"alertname": "DiskFull"},
            "commonAnnotations": {"summary": "disk"},
            "truncatedAlerts": 0,
            "alerts": [{
                "status": "firing",
                "startsAt": "2024-01-01T10:00:00Z",
                "endsAt": "0001-01-01T00:00:00Z",
                "generatorURL": "http://prometheus/graph",
                "fingerprint": "abc",
                "labels": {"alertname": "DiskFull", "instance": "db1"},
                "annotations": {"summary": "Disk full", "description": "disk full"}
            }]
        }"#;

        let group: AlertGroup = serde_json::from_str(raw).unwrap();
        assert_eq!(group.receiver, "discord");
        assert_eq!(group.status, AlertStatus::Firing);
        assert_eq!(group.alert_name(), "DiskFull");
        assert_eq!(group.external_url, "http://alertmanager:9093");
        assert_eq!(group.alerts.len(), 1);
        assert_eq!(group.alerts[0].annotations.summary, "Disk full");
        assert_eq!(group.alerts[0].generator_url, "http://prometheus/graph");
    }

    #[test]
    fn test_group_requires_alerts() {
        let raw = r#"{"receiver": "discord", "status": "firing"}"#;
        assert!(serde_json::from_str::<AlertGroup>(raw).is_err());
    }

    #[test]
    fn test_timestamps_degrade_to_zero_time() {
        let alert = Alert {
            starts_at: "2024-01-01T10:00:00+02:00".to_string(),
            ends_at: "yesterday".to_string(),
            ..Alert::default()
        };

        assert_eq!(
            alert.start_time(),
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(alert.end_time(), zero_time());
        assert_eq!(
            zero_time(),
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_display_labels_skip_reserved_keys() {
        let alert = alert_with_labels(&[
            ("instance", "db1"),
            ("metrics_value", "3"),
            ("metrics_conv", "duration"),
            ("metrics_other", "x"),
            ("value", "hidden"),
            ("Value", "shown"),
        ]);

        let labels: Vec<_> = alert.display_labels().collect();
        assert_eq!(labels, vec![("Value", "shown"), ("instance", "db1")]);
    }

    #[test]
    fn test_auxiliary_metric() {
        let alert = alert_with_labels(&[("metrics_value", "3661"), ("metrics_conv", "duration")]);
        assert_eq!(
            alert.auxiliary_metric(),
            AuxiliaryMetric {
                value: 3661.0,
                conversion: Conversion::Duration
            }
        );

        let malformed = alert_with_labels(&[("metrics_value", "lots")]);
        assert_eq!(malformed.auxiliary_metric(), AuxiliaryMetric::default());
    }

    #[test]
    fn test_conversion_from_tag() {
        assert_eq!(Conversion::from_tag("duration"), Conversion::Duration);
        assert_eq!(Conversion::from_tag("timestamp"), Conversion::Timestamp);
        assert_eq!(Conversion::from_tag("updown"), Conversion::UpDown);
        assert_eq!(Conversion::from_tag(""), Conversion::Decimal);
        assert_eq!(Conversion::from_tag("Duration"), Conversion::Decimal);
    }
}
