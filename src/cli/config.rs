use clap::{Args, Subcommand};

use crate::config::Config as AppConfig;
use crate::error::Result;

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
            println!("🔧 Current configuration:");
            println!("  🌐 source_url: {}", config.source_url);
            println!("  ⏱️  relay_timeout_seconds: {}", config.relay_timeout_seconds);
            println!("  🔤 min_suggestion_length: {}", config.min_suggestion_length);
            println!("  🔗 relays:");
            for (i, relay) in config.relays.iter().enumerate() {
                let envelope = relay
                    .envelope_field
                    .as_deref()
                    .map(|f| format!(" (unwraps '{}')", f))
                    .unwrap_or_default();
                println!("    {}. {} → {}{}", i + 1, relay.name, relay.prefix, envelope);
            }
            println!();
            println!("🌍 All keys can be overridden with TUNEDOCK_<KEY> env vars");
            println!("   Example: TUNEDOCK_RELAY_TIMEOUT_SECONDS=5");
        }

        ConfigCommands::Path => {
            let config_path = AppConfig::config_path()?;
            println!("{}", config_path.display());
        }

        ConfigCommands::Reset => {
            let config_path = AppConfig::config_path()?;
            let default_config = AppConfig::default();
            default_config.save(&config_path)?;
            println!("✅ Configuration reset to defaults");
            println!("📁 Config file: {}", config_path.display());
        }
    }

    Ok(())
}
