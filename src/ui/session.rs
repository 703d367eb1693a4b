//! The session view model: every field the user sees, in one place.
//!
//! Front ends read from it and feed it operation outcomes. It does no I/O.

use tracing::{debug, warn};

use crate::client::{AnalysisError, AnalysisOutcome};
use crate::clipboard::ClipboardError;
use crate::extract::{ExtractedDocument, ExtractionError};
use crate::models::AnalysisRequest;

use super::action::ActionControl;
use super::report::{display_count, ReportView};
use super::status::UiStatus;

/// Alert shown when a server error carries no usable detail.
pub const SERVER_ERROR_FALLBACK: &str = "Something went wrong. Check backend logs.";

/// Alert shown when the backend could not be reached.
pub const NETWORK_ERROR_ALERT: &str =
    "Network error. Try again. If it keeps failing, check the backend logs.";

#[derive(Debug, Clone)]
pub struct Session {
    /// Text to analyze.
    pub content: String,
    pub category: String,
    status: UiStatus,
    /// One-off message for the user, cleared by the next action.
    alert: Option<String>,
    report: ReportView,
    free_uses_left: Option<i64>,
    action: ActionControl,
}

impl Session {
    pub fn new(category: &str) -> Self {
        Self {
            content: String::new(),
            category: category.to_string(),
            status: UiStatus::Ready,
            alert: None,
            report: ReportView::default(),
            free_uses_left: None,
            action: ActionControl::new(),
        }
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn report(&self) -> &ReportView {
        &self.report
    }

    pub fn free_uses_left(&self) -> Option<i64> {
        self.free_uses_left
    }

    /// Remaining free uses as displayed.
    pub fn free_uses_left_display(&self) -> String {
        display_count(self.free_uses_left)
    }

    pub fn action(&self) -> &ActionControl {
        &self.action
    }

    /// Empty the content and return to the ready state.
    pub fn clear(&mut self) {
        self.content.clear();
        self.report.reset();
        self.alert = None;
        self.status = UiStatus::Ready;
    }

    /// Start an analysis: reset the panels and validate the content.
    ///
    /// Returns `None` (with a validation status) when there is nothing worth
    /// sending.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        self.report.reset();
        self.alert = None;

        match AnalysisRequest::new(&self.content, &self.category) {
            Ok(request) => {
                self.status = UiStatus::Analyzing;
                Some(request)
            }
            Err(e) => {
                debug!("Not sending: {}", e);
                self.status = UiStatus::ContentTooShort;
                None
            }
        }
    }

    /// Apply the outcome of an analysis request.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisOutcome, AnalysisError>) {
        match outcome {
            Ok(AnalysisOutcome::Success(result)) => {
                self.status = UiStatus::Done;
                self.free_uses_left = result.free_uses_left;
                self.report.render(&result);
            }
            Ok(AnalysisOutcome::QuotaExceeded { .. }) => {
                self.status = UiStatus::FreeLimitReached;
                self.free_uses_left = Some(0);
                self.report.show_paywall();
            }
            Err(AnalysisError::Server { status, detail }) => {
                self.status = UiStatus::ServerError(status);
                self.alert = Some(
                    detail
                        .map(|d| d.message())
                        .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
                );
            }
            Err(AnalysisError::Network(e)) => {
                warn!("Analysis request failed: {}", e);
                self.status = UiStatus::NetworkError;
                self.alert = Some(NETWORK_ERROR_ALERT.to_string());
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.status = UiStatus::Failed(e.to_string());
            }
        }
    }

    /// Mark a file read as started.
    pub fn begin_file_load(&mut self) {
        self.alert = None;
        self.status = UiStatus::ReadingFile;
    }

    /// Apply the outcome of a file read. Content is only replaced on success.
    pub fn finish_file_load(&mut self, outcome: Result<ExtractedDocument, ExtractionError>) {
        self.status = match outcome {
            Ok(doc) => {
                let chars = doc.text.chars().count();
                self.content = doc.text;
                UiStatus::FileLoaded {
                    name: doc.name,
                    chars,
                }
            }
            Err(ExtractionError::UnsupportedType(name)) => UiStatus::FileUnsupported(name),
            Err(ExtractionError::NoReadableText(name)) => UiStatus::FileUnreadable(name),
            Err(e) => {
                warn!("File read failed: {}", e);
                UiStatus::FileFailed(e.to_string())
            }
        };
    }

    /// Apply the outcome of copying the safe reply.
    pub fn finish_copy(&mut self, outcome: Result<(), ClipboardError>) {
        self.status = match outcome {
            Ok(()) => UiStatus::Copied,
            Err(e) => {
                warn!("Copy failed: {}", e);
                UiStatus::CopyFailed
            }
        };
    }
}
