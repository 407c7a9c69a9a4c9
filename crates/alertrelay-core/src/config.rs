//! Configuration management for AlertRelay
//!
//! The relay is configured once at startup. The resulting [`Config`] is
//! immutable and shared read-only between request handlers.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

/// Address the ingress server binds to when none is configured
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:9094";

/// Layout used for every absolute timestamp shown in a message
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static DISCORD_WEBHOOK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://discord(?:app)?\.com/api/webhooks/[0-9]{18,19}/[a-zA-Z0-9_-]+")
        .expect("webhook pattern is a valid regex")
});

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord webhook that receives every outbound message
    pub webhook_url: Url,
    /// Address:port the ingress server listens on
    pub listen_address: String,
    /// Echo inbound and outbound payloads to the log
    pub debug: bool,
    /// Timezone used to display timestamps
    pub timezone: DisplayTimezone,
}

impl Config {
    /// Create a configuration for the given webhook URL with default settings.
    ///
    /// Fails when the URL is empty or cannot be parsed. A URL that parses but
    /// does not look like a Discord webhook is accepted with a warning.
    pub fn new(webhook_url: &str) -> Result<Self> {
        Ok(Self {
            webhook_url: parse_webhook_url(webhook_url)?,
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            debug: false,
            timezone: DisplayTimezone::Local,
        })
    }

    /// Set the listen address. An empty address keeps the default.
    #[must_use]
    pub fn with_listen_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        if !address.trim().is_empty() {
            self.listen_address = address.trim().to_string();
        }
        self
    }

    /// Enable or disable payload echoing
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the display timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: DisplayTimezone) -> Self {
        self.timezone = timezone;
        self
    }
}

/// Validate the webhook URL
pub fn parse_webhook_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::config(
            "Environment variable 'DISCORD_WEBHOOK' or CLI parameter '--webhook-url' not found",
        ));
    }

    let url = Url::parse(raw)?;

    if !DISCORD_WEBHOOK_PATTERN.is_match(raw) {
        warn!(
            host = url.host_str().unwrap_or_default(),
            "The Discord webhook URL doesn't seem to be valid"
        );
    }

    Ok(url)
}

/// Timezone in which timestamps are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayTimezone {
    /// The host's local timezone
    #[default]
    Local,
    /// A named IANA timezone
    Named(Tz),
}

impl DisplayTimezone {
    /// Resolve a timezone name such as `Europe/Paris`.
    ///
    /// An empty name means local time. An unknown name also falls back to
    /// local time, with a warning.
    pub fn resolve(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return Self::Local;
        }

        match name.parse::<Tz>() {
            Ok(tz) => Self::Named(tz),
            Err(e) => {
                warn!(timezone = %name, error = %e, "Unknown timezone, using local time");
                Self::Local
            }
        }
    }

    /// Format an instant as `YYYY-MM-DD HH:MM:SS` in this timezone
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        match self {
            Self::Local => instant.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string(),
            Self::Named(tz) => instant.with_timezone(tz).format(DATE_TIME_FORMAT).to_string(),
        }
    }
}
