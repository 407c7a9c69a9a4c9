//! # AlertRelay
//!
//! Relays Alertmanager webhook notifications to a Discord channel.
//!
//! Alertmanager posts alert groups to the relay; each alert is rendered into
//! a Discord embed, embeds are batched ten to a message, and every message is
//! posted to the configured Discord webhook.
//!
//! ## Architecture
//!
//! - **API**: accepts webhooks on any path and always answers `200 OK`
//! - **Render**: severity colors, metric formatting, embed layout, batching
//! - **Delivery**: best-effort POST to the Discord webhook
//! - **Pipeline**: ties the three together per request
//!
//! ## Quick Start
//!
//! ```bash
//! DISCORD_WEBHOOK=https://discord.com/api/webhooks/<id>/<token> alertrelay
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::api::{AppState, HttpServer};
    pub use crate::config::{Config, DisplayTimezone};
    pub use crate::delivery::{DeliveryResult, WebhookClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::pipeline::Pipeline;
    pub use crate::render::AlertRenderer;
}
