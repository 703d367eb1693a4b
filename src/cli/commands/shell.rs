//! Interactive session.
//!
//! Plain lines are appended to the content buffer. Lines starting with `:`
//! are commands.

use std::io::Write;
use std::path::PathBuf;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use trustfilter::config::Config;
use trustfilter::ui::UiStatus;
use trustfilter::App;

use super::helpers::{exit_code, spinner};
use crate::cli::icons;
use crate::cli::render::{format_session, help_line, status_line};

enum ShellCommand {
    Analyze,
    Load(PathBuf),
    Category(String),
    Clear,
    Copy,
    Show,
    Id,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(':')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };
        Some(match name {
            "analyze" | "a" => Self::Analyze,
            "load" | "l" if !arg.is_empty() => {
                Self::Load(PathBuf::from(shellexpand::tilde(arg).as_ref()))
            }
            "category" | "c" if !arg.is_empty() => Self::Category(arg.to_string()),
            "clear" => Self::Clear,
            "copy" => Self::Copy,
            "show" | "s" => Self::Show,
            "id" => Self::Id,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }
}

fn print_help() {
    println!("{}", style("Commands").bold());
    println!("{}", help_line(":analyze", "Send the content for analysis"));
    println!("{}", help_line(":load PATH", "Replace content with a .txt, .docx or .pdf file"));
    println!("{}", help_line(":category NAME", "Set the analysis category"));
    println!("{}", help_line(":clear", "Reset content and report"));
    println!("{}", help_line(":copy", "Copy the safe reply"));
    println!("{}", help_line(":show", "Show content length, status and report"));
    println!("{}", help_line(":id", "Show the client id"));
    println!("{}", help_line(":quit", "Leave the shell"));
    println!("Any other line is appended to the content.");
}

fn prompt(app: &App) {
    print!(
        "{} ",
        style(format!("[{} | {} chars]>", app.session().category, app.session().content.chars().count())).dim()
    );
    let _ = std::io::stdout().flush();
}

/// Run the interactive shell until `:quit` or end of input.
///
/// Returns the exit code of the last analysis.
pub async fn cmd_shell(config: &Config, category: Option<String>) -> anyhow::Result<i32> {
    let mut app = App::new(config)?;
    if let Some(category) = category {
        app.session_mut().category = category;
    }

    println!("{}", style("Trust Filter").bold().cyan());
    println!("  {} Backend: {}", icons::info(), app.analyze_url());
    println!("  {} Type :help for commands", icons::info());
    println!();

    let mut last_code = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(&app);
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let Some(command) = ShellCommand::parse(&line) else {
            let content = &mut app.session_mut().content;
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(&line);
            continue;
        };

        match command {
            ShellCommand::Analyze => {
                let pb = spinner("Analyzing...");
                let status = app.analyze().await.clone();
                pb.finish_and_clear();
                last_code = exit_code(&status);
                println!("{}", format_session(app.session()));
            }
            ShellCommand::Load(path) => {
                let pb = spinner(&format!("Reading {}...", path.display()));
                let status = app.load_file(&path).await.clone();
                pb.finish_and_clear();
                println!("{}", status_line(&status));
            }
            ShellCommand::Category(name) => {
                app.session_mut().category = name;
                println!("{} Category set to {}", icons::success(), app.session().category);
            }
            ShellCommand::Clear => {
                app.clear();
                println!("{}", status_line(app.session().status()));
            }
            ShellCommand::Copy => {
                if app.session().report().has_result() {
                    println!("{}", status_line(app.copy_reply().await));
                } else {
                    println!("{} No reply to copy", icons::warn());
                }
            }
            ShellCommand::Show => {
                let session = app.session();
                println!(
                    "{} {} characters in content, category {}",
                    icons::bullet(),
                    session.content.chars().count(),
                    session.category
                );
                println!("{}", format_session(session));
            }
            ShellCommand::Id => println!("{}", app.client_id()),
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(name) => {
                println!("{} Unknown command :{} (try :help)", icons::error(), name);
            }
        }

        if matches!(app.session().status(), UiStatus::FreeLimitReached) {
            println!("{} No free analyses left for this client", icons::warn());
        }
    }

    Ok(last_code)
}
