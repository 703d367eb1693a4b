//! Mapping of the backend's free-text risk level onto three bands.

use serde::Serialize;

/// Severity band shown on the report badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    /// Classify a risk level by case-insensitive substring.
    ///
    /// `high` wins over `medium`; anything else, including a missing or
    /// unrecognized value, is low.
    pub fn classify(level: Option<&str>) -> Self {
        let s = level.unwrap_or_default().to_lowercase();
        if s.contains("high") {
            Self::High
        } else if s.contains("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH RISK",
            Self::Medium => "MEDIUM RISK",
            Self::Low => "LOW RISK",
        }
    }

    /// Badge colour in the terminal.
    pub fn color(&self) -> console::Color {
        match self {
            Self::High => console::Color::Red,
            Self::Medium => console::Color::Yellow,
            Self::Low => console::Color::Green,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
