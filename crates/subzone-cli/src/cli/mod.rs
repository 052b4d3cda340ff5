//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use subzone::config::LogConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let (config_path, config) = crate::config::load(cli.config)?;

    let output_format = cli.output.unwrap_or_default();
    init_logging(&config.log, cli.verbose);
    debug!(path = %config_path.display(), output = %output_format, "loaded configuration");

    // Secret from CLI/env, then config
    let secret = cli.secret.or_else(|| config.auth.secret.clone());

    let ctx = commands::Context {
        config,
        config_path,
        secret,
        output_format,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Submit(args) => commands::submit::execute(ctx, args).await,
        Commands::Zone(args) => commands::zone::execute(ctx, args).await,
        Commands::Pass(args) => commands::pass::execute(ctx, args).await,
        Commands::Mail(args) => commands::mail::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr so stdout stays clean for zone output.
fn init_logging(log: &LogConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when embedded.
    let _ = if log.format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}
