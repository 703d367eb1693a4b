//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod config_cmd;
mod extract;
mod helpers;
mod identity;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use trustfilter::config::Config;

#[derive(Parser)]
#[command(name = "tfa")]
#[command(about = "Check messages and documents for manipulation and scam risk")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long, global = true, env = "TFA_API_URL")]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text or a document and print the risk report
    Analyze {
        /// Text to analyze (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,
        /// Load the content from a .txt, .docx or .pdf file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Content category (defaults to the configured category)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Copy the suggested safe reply to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Print the text extracted from a document (no network)
    Extract {
        /// A .txt, .docx or .pdf file
        file: PathBuf,
    },

    /// Interactive session: paste text, load files, analyze, copy replies
    Shell {
        /// Content category (defaults to the configured category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Show the anonymous client id sent with every request
    ClientId,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

/// Parse arguments and run the selected command. Returns the process exit code.
pub async fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.api_url.as_deref()).await?;

    match cli.command {
        Commands::Analyze {
            text,
            file,
            category,
            json,
            copy,
        } => {
            analyze::cmd_analyze(
                &config,
                analyze::AnalyzeArgs {
                    text,
                    file,
                    category,
                    json,
                    copy,
                },
            )
            .await
        }
        Commands::Extract { file } => extract::cmd_extract(&file).await,
        Commands::Shell { category } => shell::cmd_shell(&config, category).await,
        Commands::ClientId => identity::cmd_client_id(&config),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
        },
    }
}

async fn load_config(
    path: Option<&std::path::Path>,
    api_url: Option<&str>,
) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::load_from_path(path).await?.with_env_overrides()
        }
        None => Config::load().await,
    };

    if let Some(url) = api_url {
        config.api_base = url.to_string();
    }
    config.api_base_url()?;
    Ok(config)
}
