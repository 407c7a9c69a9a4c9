//! Rendering of alert groups into chat messages
//!
//! Each alert becomes one embed. Embeds are then batched into messages that
//! respect the webhook's per-message embed limit.

mod batch;
mod format;
mod renderer;
mod severity;

pub use batch::{batch, header};
pub use format::{format_elapsed, format_seconds, format_value};
pub use renderer::{AlertRenderer, NORMAL_STATUS};
pub use severity::{severity_color, Severity};
