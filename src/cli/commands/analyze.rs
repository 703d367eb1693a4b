//! One-shot analysis command.

use std::path::PathBuf;

use trustfilter::config::Config;
use trustfilter::App;

use super::helpers::{exit_code, read_stdin, spinner};
use crate::cli::icons;
use crate::cli::render::{format_session, status_line, SessionSnapshot};

pub struct AnalyzeArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub category: Option<String>,
    pub json: bool,
    pub copy: bool,
}

/// Analyze text from an argument, a file, or stdin.
pub async fn cmd_analyze(config: &Config, args: AnalyzeArgs) -> anyhow::Result<i32> {
    let mut app = App::new(config)?;
    if let Some(category) = args.category {
        app.session_mut().category = category;
    }

    if let Some(path) = &args.file {
        let pb = spinner(&format!("Reading {}...", path.display()));
        let status = app.load_file(path).await.clone();
        pb.finish_and_clear();

        if !matches!(status, trustfilter::UiStatus::FileLoaded { .. }) {
            // Nothing was loaded, so nothing is sent
            eprintln!("{}", status_line(&status));
            return Ok(exit_code(&status));
        }
        if !args.json {
            eprintln!("{}", status_line(&status));
        }
    } else {
        app.session_mut().content = match args.text {
            Some(text) => text,
            None => read_stdin().await?,
        };
    }

    let pb = spinner("Analyzing...");
    let status = app.analyze().await.clone();
    pb.finish_and_clear();
    let code = exit_code(&status);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&SessionSnapshot::new(app.session()))?
        );
    } else {
        println!("{}", format_session(app.session()));
    }

    if args.copy {
        if app.session().report().has_result() {
            app.copy_reply().await;
            eprintln!("{}", status_line(app.session().status()));
        } else {
            eprintln!("{} No reply to copy", icons::warn());
        }
    }

    Ok(code)
}
