//! Data models for AlertRelay

mod alert;
mod message;

pub use alert::*;
pub use message::*;
