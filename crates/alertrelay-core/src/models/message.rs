//! Outbound message models

/// Maximum number of rendered alerts carried by one outbound message
pub const MAX_UNITS_PER_MESSAGE: usize = 10;

/// Title of the warning sent when the relay receives Prometheus alerts
pub const MISCONFIGURATION_TITLE: &str = "You have misconfigured this software";

/// Body of the misconfiguration warning
pub const MISCONFIGURATION_TEXT: &str = "This relay is meant to be fed by Alertmanager.\n\
It is not a replacement for Alertmanager, it is a\n\
webhook receiver for it. Please read the README.md\n\
for guidance on how to configure Alertmanager for it\n\
or https://prometheus.io/docs/alerting/latest/configuration/#webhook_config";

/// Embed colors understood by Discord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedColor {
    /// Critical or unknown severity
    Red,
    /// Warning
    Orange,
    /// Resolved
    Green,
    /// Debug, or an unrecognized alert status
    Grey,
    /// Info
    Blue,
}

impl EmbedColor {
    /// RGB value sent on the wire
    pub const fn value(self) -> u32 {
        match self {
            Self::Red => 0x0099_2D22,
            Self::Orange => 0x00F0_B816,
            Self::Green => 0x002E_CC71,
            Self::Grey => 0x0095_A5A6,
            Self::Blue => 0x0058_B9FF,
        }
    }
}

/// Presentation-ready form of one alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// `[STATUS] summary`
    pub title: String,
    /// Embed color
    pub color: EmbedColor,
    /// Formatted markdown body
    pub body: String,
}

/// One message posted to the webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Header line shown above the embeds
    pub content: String,
    /// At most [`MAX_UNITS_PER_MESSAGE`] rendered alerts
    pub units: Vec<RenderedUnit>,
}

impl OutboundMessage {
    /// Create a message
    pub fn new(content: impl Into<String>, units: Vec<RenderedUnit>) -> Self {
        Self {
            content: content.into(),
            units,
        }
    }

    /// The fixed warning sent when Prometheus posts to the relay directly
    pub fn misconfiguration_warning() -> Self {
        Self::new(
            "",
            vec![RenderedUnit {
                title: MISCONFIGURATION_TITLE.to_string(),
                color: EmbedColor::Grey,
                body: MISCONFIGURATION_TEXT.to_string(),
            }],
        )
    }
}
