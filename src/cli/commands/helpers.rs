//! Shared helper functions for CLI commands.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;

use trustfilter::ui::UiStatus;

/// Exit code when the free quota is spent.
pub const EXIT_FREE_LIMIT: i32 = 2;

/// Spinner shown while an operation is in flight. Hidden when stderr is not a
/// terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Read all of stdin as text.
pub async fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

/// Process exit code for a final status.
pub fn exit_code(status: &UiStatus) -> i32 {
    match status {
        UiStatus::FreeLimitReached => EXIT_FREE_LIMIT,
        s if s.is_error() => 1,
        _ => 0,
    }
}
