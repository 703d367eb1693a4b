//! trustfilter - content risk analysis client.
//!
//! Extracts text from pasted input or documents (TXT, DOCX, PDF), submits it
//! to a trust-filter backend tagged with an anonymous client id, and turns the
//! response into a risk report, a paywall notice, or an error status.

pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod extract;
pub mod identity;
pub mod models;
pub mod risk;
pub mod ui;

pub use app::App;
pub use client::{AnalysisClient, AnalysisError, AnalysisOutcome};
pub use config::Config;
pub use extract::{DocumentKind, DocumentLoader, ExtractedDocument, ExtractionError};
pub use identity::ClientIdentity;
pub use models::{AnalysisRequest, AnalysisResult, ErrorDetail, ValidationError};
pub use risk::RiskBand;
pub use ui::{Session, UiStatus};
