//! Severity classification

use crate::models::EmbedColor;

/// Severity levels recognized in the `severity` label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Debug
    Debug,
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Critical
    Critical,
}

impl Severity {
    /// Parse a severity label value. Matching is exact.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Embed color for this severity
    pub const fn color(self) -> EmbedColor {
        match self {
            Self::Debug => EmbedColor::Grey,
            Self::Info => EmbedColor::Blue,
            Self::Warning => EmbedColor::Orange,
            Self::Critical => EmbedColor::Red,
        }
    }
}

/// Color for a severity label value. Anything unrecognized is red.
pub fn severity_color(severity: &str) -> EmbedColor {
    Severity::parse(severity).map_or(EmbedColor::Red, Severity::color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("debug", EmbedColor::Grey)]
    #[case("info", EmbedColor::Blue)]
    #[case("warning", EmbedColor::Orange)]
    #[case("critical", EmbedColor::Red)]
    #[case("", EmbedColor::Red)]
    #[case("firing", EmbedColor::Red)]
    #[case("Warning", EmbedColor::Red)]
    #[case("page", EmbedColor::Red)]
    fn test_severity_color(#[case] severity: &str, #[case] expected: EmbedColor) {
        assert_eq!(severity_color(severity), expected);
    }
}
