//! ThriveCart CLI - Command-line interface for the ThriveCart REST API
//!
//! This is the main entry point for the `thrivecart` binary, providing
//! commands for reading account data and running account actions.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::{Config, Overrides};
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use thrivecart_core::CatalogKind;
use tracing::instrument;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = match load_config(&cli) {
        Ok(config) => {
            if let Err(e) = init_logging(&cli, &config) {
                eprintln!("Failed to initialize logging: {}", e);
            }
            run(cli, config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            let message = logging::redaction::redact_sensitive(&error::format_error(
                &e,
                control::SHOULD_COLORIZE.should_colorize(),
            ));
            eprintln!("{}", message);

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Resolve configuration from file, environment and flags
fn load_config(cli: &Cli) -> Result<Config> {
    let overrides = Overrides {
        access_token: cli.access_token.clone(),
        mode: cli.mode.map(Into::into),
        base_uri: cli.base_uri.clone(),
        timeout: cli.timeout,
    };
    Config::resolve(cli.config.as_deref(), &overrides)
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet, cli.verbosity_level());

    tracing::info!(
        mode = %config.mode,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Ping => handlers::handle_ping(&config, &mut output).await,
        Commands::Account => handlers::handle_account(&config, &mut output).await,
        Commands::Products(args) => {
            handlers::handle_catalog(CatalogKind::Product, args, &config, &mut output).await
        }
        Commands::Bumps(args) => {
            handlers::handle_catalog(CatalogKind::Bump, args, &config, &mut output).await
        }
        Commands::Upsells(args) => {
            handlers::handle_catalog(CatalogKind::Upsell, args, &config, &mut output).await
        }
        Commands::Downsells(args) => {
            handlers::handle_catalog(CatalogKind::Downsell, args, &config, &mut output).await
        }
        Commands::Transactions(args) => {
            handlers::handle_transactions(args, &config, &mut output).await
        }
        Commands::Customer(args) => handlers::handle_customer(args, &config, &mut output).await,
        Commands::Refund(args) => handlers::handle_refund(args, &config, &mut output).await,
        Commands::Subscription(args) => {
            handlers::handle_subscription(args, &config, &mut output).await
        }
        Commands::Affiliates(args) => handlers::handle_affiliates(args, &config, &mut output).await,
        Commands::Events(args) => handlers::handle_events(args, &config, &mut output).await,
        Commands::Oauth(args) => handlers::handle_oauth(args, &config, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = if cli.quiet {
        LoggingConfig::quiet()
    } else {
        let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
        logging_config.apply_settings(&config.logging, cli.verbosity_level());
        logging_config
    };

    logging_config.merge_with_env();

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["thrivecart", "-vv", "transactions", "--per-page", "5"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["thrivecart", "--quiet", "ping"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_flags_become_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"access_token": "from-file", "timeout": 9}"#).unwrap();

        let cli = Cli::parse_from([
            "thrivecart",
            "--config",
            path.to_str().unwrap(),
            "--access-token",
            "from-flag",
            "--mode",
            "test",
            "ping",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("from-flag"));
        assert_eq!(config.mode, thrivecart_core::Mode::Test);
        assert_eq!(config.timeout, 9);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["thrivecart", "--config", "/nonexistent/thrivecart.yaml", "ping"]);
        assert_eq!(load_config(&cli).unwrap_err().exit_code(), 3);
    }
}
