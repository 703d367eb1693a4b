//! Terminal rendering of the session.

use console::{style, Color};
use serde::Serialize;

use trustfilter::ui::{ReportView, Session, UiStatus};

use super::icons;

/// Status line with an icon matching its severity.
pub fn status_line(status: &UiStatus) -> String {
    let icon = match status {
        UiStatus::Done | UiStatus::Copied | UiStatus::FileLoaded { .. } => icons::success(),
        UiStatus::FreeLimitReached => icons::warn(),
        s if s.is_error() => icons::error(),
        _ => icons::info(),
    };
    format!("{} {}", icon, status)
}

/// Full human-readable view of the session.
pub fn format_session(session: &Session) -> String {
    let mut out = Vec::new();
    out.push(status_line(session.status()));
    if let Some(alert) = session.alert() {
        out.push(format!("  {} {}", icons::warn(), alert));
    }

    let report = session.report();
    if report.visible {
        out.push(String::new());
        if report.paywall_visible {
            out.extend(paywall_lines());
        }
        if report.has_result() {
            out.extend(report_lines(report));
        }
    }

    out.push(String::new());
    out.push(format!(
        "{} {}",
        style("Free uses left:").dim(),
        session.free_uses_left_display()
    ));
    out.join("\n")
}

fn paywall_lines() -> Vec<String> {
    vec![
        style("Free limit reached").bold().yellow().to_string(),
        "You have used all free analyses for this client.".to_string(),
        "Upgrade on the service website to keep analyzing.".to_string(),
    ]
}

fn report_lines(report: &ReportView) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(band) = report.badge {
        out.push(format!(
            "{}  {} {}",
            style(format!(" {} ", band.label()))
                .bold()
                .fg(Color::Black)
                .bg(band.color()),
            style("Red flag score:").dim(),
            report.score
        ));
    }

    push_list(&mut out, "Manipulation tactics", &report.tactics);
    push_list(&mut out, "Missing proof", &report.missing_proof);
    push_list(&mut out, "Verification checklist", &report.checklist);

    if !report.safe_reply.is_empty() {
        out.push(String::new());
        out.push(style("Safe reply").bold().to_string());
        for line in report.safe_reply.lines() {
            out.push(format!("  {}", line));
        }
    }
    if !report.disclaimer.is_empty() {
        out.push(String::new());
        out.push(style(&report.disclaimer).dim().italic().to_string());
    }
    out
}

fn push_list(out: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push(String::new());
    out.push(style(title).bold().to_string());
    for (i, item) in items.iter().enumerate() {
        out.push(format!("  {}. {}", i + 1, item));
    }
}

/// Machine-readable view of the session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<&'a str>,
    pub free_uses_left: Option<i64>,
    pub report: &'a ReportView,
}

impl<'a> SessionSnapshot<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            status: session.status().to_string(),
            alert: session.alert(),
            free_uses_left: session.free_uses_left(),
            report: session.report(),
        }
    }
}

/// Bulleted help line for the interactive shell.
pub fn help_line(command: &str, text: &str) -> String {
    format!("  {} {:<16} {}", icons::bullet(), command, style(text).dim())
}
