use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config as AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  lastfm_api_key: {}", mask_key(config.lastfm_api_key.as_deref()));
            println!("  lastfm_base_url: {}", config.lastfm_base_url);
            println!("  youtube_base_url: {}", config.youtube_base_url);
            println!("  cache_ttl_seconds: {}", config.cache_ttl_seconds);
            println!("  youtube_limit: {}", config.youtube_limit);
            println!("  lastfm_limit: {}", config.lastfm_limit);
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }

        ConfigCommands::Reset => {
            let path = AppConfig::config_path()?;
            let defaults = AppConfig::default();
            defaults.save(&path)?;
            println!("Configuration reset to defaults: {}", path.display());
        }
    }

    Ok(())
}

fn mask_key(key: Option<&str>) -> String {
    match key {
        None => "(not set)".to_string(),
        Some(k) if k.len() <= 4 => "****".to_string(),
        Some(k) => format!("{}****", &k[..4]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_key_hides_all_but_prefix() {
        assert_eq!(mask_key(None), "(not set)");
        assert_eq!(mask_key(Some("ab")), "****");
        assert_eq!(mask_key(Some("9e56e3c9932d")), "9e56****");
    }
}
