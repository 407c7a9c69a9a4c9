//! Delivery of outbound messages to the chat webhook

mod client;

pub use client::{encode, DeliveryError, DeliveryResult, WebhookClient};
