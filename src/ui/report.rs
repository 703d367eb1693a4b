//! Report panel state built from an analysis result.

use serde::Serialize;

use crate::models::AnalysisResult;
use crate::risk::RiskBand;

/// Shown for unknown numbers.
pub const PLACEHOLDER_DASH: &str = "—";

/// Shown when no manipulation tactics were reported.
pub const NO_TACTICS: &str = "None obvious detected";

/// Everything the report and paywall panels display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub visible: bool,
    pub paywall_visible: bool,
    /// `None` until a result has been rendered.
    pub badge: Option<RiskBand>,
    pub score: String,
    pub tactics: Vec<String>,
    pub missing_proof: Vec<String>,
    pub checklist: Vec<String>,
    pub safe_reply: String,
    pub disclaimer: String,
}

impl Default for ReportView {
    fn default() -> Self {
        Self {
            visible: false,
            paywall_visible: false,
            badge: None,
            score: PLACEHOLDER_DASH.to_string(),
            tactics: Vec::new(),
            missing_proof: Vec::new(),
            checklist: Vec::new(),
            safe_reply: String::new(),
            disclaimer: String::new(),
        }
    }
}

impl ReportView {
    /// Overwrite every field from `result` and show the panel.
    pub fn render(&mut self, result: &AnalysisResult) {
        let tactics = result.manipulation_tactics.clone().unwrap_or_default();

        *self = Self {
            visible: true,
            paywall_visible: false,
            badge: Some(RiskBand::classify(result.risk_level.as_deref())),
            score: display_score(result.red_flag_score),
            tactics: if tactics.is_empty() {
                vec![NO_TACTICS.to_string()]
            } else {
                tactics
            },
            missing_proof: result.missing_proof.clone().unwrap_or_default(),
            checklist: result.verification_checklist.clone().unwrap_or_default(),
            safe_reply: result.safe_reply.clone().unwrap_or_default(),
            disclaimer: result.disclaimer.clone().unwrap_or_default(),
        };
    }

    /// Show the paywall with an empty report body.
    pub fn show_paywall(&mut self) {
        *self = Self {
            visible: true,
            paywall_visible: true,
            ..Self::default()
        };
    }

    /// Hide both panels and drop any previous result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// A result body is present (not just the paywall).
    pub fn has_result(&self) -> bool {
        self.badge.is_some()
    }
}

/// Format a score as given, or a dash when unknown.
pub fn display_score(score: Option<f64>) -> String {
    score
        .filter(|s| s.is_finite())
        .map(|s| s.to_string())
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
}

/// Format a remaining-uses count, or a dash when unknown.
pub fn display_count(count: Option<i64>) -> String {
    count
        .map(|c| c.to_string())
        .unwrap_or_else(|| PLACEHOLDER_DASH.to_string())
}
