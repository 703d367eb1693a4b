//! Client identity command.

use console::style;

use trustfilter::config::Config;
use trustfilter::identity::ClientIdentity;

use crate::cli::icons;

/// Print the persistent client id, creating it on first use.
pub fn cmd_client_id(config: &Config) -> anyhow::Result<i32> {
    let path = config.identity_file();
    let id = ClientIdentity::from_path(path.clone()).get_or_create();

    println!("{}", id);
    match path {
        Some(p) => eprintln!("  {} Stored in {}", icons::info(), style(p.display()).dim()),
        None => eprintln!("  {} Not persisted (no data directory)", icons::warn()),
    }
    Ok(0)
}
