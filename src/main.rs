use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};

mod cli;
mod core;
mod daemon;
mod notifiers;
mod providers;

use crate::core::credentials::Credentials;
use crate::core::errors::ConfigError;
use crate::core::settings::Settings;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(author, version, about = "Forwards homework review status changes to Telegram")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and forwarding status changes
    Run,

    /// Fetch the latest homework status once
    Check {
        /// Lower bound for the query, in Unix seconds (default: now)
        #[arg(long)]
        since: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also send the latest status to Telegram
        #[arg(long)]
        notify: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings pick the log format, so they load first. Logging is then up
/// before credentials are checked, and a missing variable is reported in the
/// usual log format.
fn startup<F>(config: Option<&Path>, load_credentials: F) -> Result<(Settings, Credentials)>
where
    F: FnOnce() -> Result<Credentials, ConfigError>,
{
    let settings = Settings::load(config)?;
    crate::core::logging::init(settings.logging.format);
    tracing::debug!(?config, "Settings loaded");
    settings.validate()?;

    let credentials = load_credentials().inspect_err(|e| {
        tracing::error!(error = %e, "Required environment variables are not set, stopping");
    })?;

    Ok((settings, credentials))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let (settings, credentials) = startup(cli.config.as_deref(), Credentials::from_env)?;
            daemon::run(&settings, &credentials).await
        }
        Commands::Check {
            since,
            json,
            notify,
        } => {
            let (settings, credentials) = startup(cli.config.as_deref(), Credentials::from_env)?;
            cli::check::run(&settings, &credentials, since, json, notify).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credentials::{PRACTICUM_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_TOKEN};

    fn lookup(name: &str) -> Option<String> {
        match name {
            PRACTICUM_TOKEN => Some("p-token".to_string()),
            TELEGRAM_TOKEN => Some("t-token".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_startup_fails_without_chat_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");

        let err = startup(Some(&config), || Credentials::from_lookup(lookup)).unwrap_err();

        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        let ConfigError::MissingVariables(missing) = config_err;
        assert_eq!(missing, &vec![TELEGRAM_CHAT_ID]);
        assert!(err.to_string().contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn test_startup_rejects_invalid_settings_before_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[polling]\ninterval_secs = 0\n").unwrap();

        let mut credentials_read = false;
        let result = startup(Some(&config), || {
            credentials_read = true;
            Credentials::from_lookup(lookup)
        });

        assert!(result.is_err());
        assert!(!credentials_read);
    }

    #[test]
    fn test_startup_with_all_variables() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[polling]\ninterval_secs = 30\n").unwrap();

        let (settings, credentials) = startup(Some(&config), || {
            Credentials::from_lookup(|name| lookup(name).or_else(|| Some("42".to_string())))
        })
        .unwrap();

        assert_eq!(settings.polling.interval_secs, 30);
        assert_eq!(credentials.telegram_chat_id, "42");
    }
}
