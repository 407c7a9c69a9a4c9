//! Rendering of a single alert into a chat embed

use crate::config::DisplayTimezone;
use crate::models::{Alert, AlertStatus, EmbedColor, RenderedUnit};

use super::format::{format_elapsed, format_value};
use super::severity::severity_color;

/// Display status of a resolved alert
pub const NORMAL_STATUS: &str = "normal";

/// Display status of a firing alert without a severity label
const FIRING_STATUS: &str = "firing";

const SEPARATOR: &str = "------";

/// Turns alerts into embeds, displaying times in a fixed timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertRenderer {
    timezone: DisplayTimezone,
}

impl AlertRenderer {
    /// Create a renderer for the given display timezone
    pub fn new(timezone: DisplayTimezone) -> Self {
        Self { timezone }
    }

    /// Render one alert. Malformed fields degrade, they never fail.
    pub fn render(&self, alert: &Alert) -> RenderedUnit {
        let (status, color) = display_status(alert);

        let start = alert.start_time();
        let end = alert.end_time();
        let ended = end > start;
        let event_time = if ended { end } else { start };

        let mut labels: Vec<String> = alert
            .display_labels()
            .map(|(key, value)| format!(": - **_{key}:_** {value}"))
            .collect();

        if status != NORMAL_STATUS {
            let metric = alert.auxiliary_metric();
            labels.push(format!(
                ": - **_value:_** {}",
                format_value(metric.value, metric.conversion, &self.timezone)
            ));
        }

        let description: Vec<String> = alert
            .annotations
            .description
            .split('\n')
            .map(|line| format!(": - {line}"))
            .collect();

        let mut sections = vec![
            format!("**⏰ Event Time:** {}", self.timezone.format(event_time)),
            format!("**🏷️ Alert labels:**\n{}", labels.join("\n")),
            SEPARATOR.to_string(),
            format!("**📖 Description:**\n{}", description.join("\n")),
        ];

        if ended {
            sections.push(SEPARATOR.to_string());
            sections.push(format!("**⏲️ Duration:** {}", format_elapsed(end - start)));
            sections.push(format!(": - **_Start:_** {}", self.timezone.format(start)));
            sections.push(format!(": - **_End:_** {}", self.timezone.format(end)));
        }

        RenderedUnit {
            title: format!(
                "[{}] {}",
                status.to_uppercase(),
                alert.annotations.summary
            ),
            color,
            body: sections.join("\n"),
        }
    }
}

/// Status shown in the title, and the matching color
fn display_status(alert: &Alert) -> (&str, EmbedColor) {
    match &alert.status {
        AlertStatus::Firing => {
            let status = alert.severity().unwrap_or(FIRING_STATUS);
            (status, severity_color(status))
        }
        AlertStatus::Resolved => (NORMAL_STATUS, EmbedColor::Green),
        AlertStatus::Other(raw) => (raw.as_str(), EmbedColor::Grey),
    }
}
