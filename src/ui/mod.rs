//! Front-end independent view state.
//!
//! - [`Session`] holds the content, category, status line, report panel,
//!   paywall panel and remaining free uses
//! - [`ActionControl`] serializes analyze and file-read operations
//! - [`ReportView`] is the rendered form of an analysis result

mod action;
mod report;
mod session;
mod status;

pub use action::{ActionControl, ActionGuard};
pub use report::{display_count, display_score, ReportView, NO_TACTICS, PLACEHOLDER_DASH};
pub use session::{Session, NETWORK_ERROR_ALERT, SERVER_ERROR_FALLBACK};
pub use status::UiStatus;
