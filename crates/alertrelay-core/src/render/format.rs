//! Presentation of auxiliary metric values

use std::time::Duration;

use chrono::DateTime;

use crate::config::DisplayTimezone;
use crate::models::Conversion;

/// Format a metric value according to its conversion hint.
///
/// Total over every input: out-of-range timestamps and unknown hints fall
/// back to a two-decimal number.
#[allow(clippy::cast_possible_truncation)]
pub fn format_value(value: f64, conversion: Conversion, timezone: &DisplayTimezone) -> String {
    match conversion {
        Conversion::Duration => format_seconds(value as i64),
        Conversion::Timestamp => match DateTime::from_timestamp(value as i64, 0) {
            Some(instant) => timezone.format(instant),
            None => format_decimal(value),
        },
        Conversion::UpDown => {
            #[allow(clippy::float_cmp)]
            let up = value == 1.0;
            String::from(if up { "up" } else { "down" })
        }
        Conversion::Decimal => format_decimal(value),
    }
}

/// Format a whole number of seconds, largest unit first (`1h 1m 1s`)
pub fn format_seconds(seconds: i64) -> String {
    let formatted = humantime::format_duration(Duration::from_secs(seconds.unsigned_abs()));
    if seconds < 0 {
        format!("-{formatted}")
    } else {
        formatted.to_string()
    }
}

/// Format an elapsed time, largest unit first
pub fn format_elapsed(elapsed: chrono::Duration) -> String {
    humantime::format_duration(elapsed.to_std().unwrap_or_default()).to_string()
}

fn format_decimal(value: f64) -> String {
    format!("{value:.2}")
}
