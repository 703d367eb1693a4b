//! Configuration management commands.

use console::style;

use trustfilter::config::Config;

/// Print the effective configuration as JSON.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<i32> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    eprintln!("{} {}", style("Loaded from:").dim(), source);
    eprintln!("{} {}", style("Endpoint:").dim(), config.analyze_url()?);

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(0)
}
