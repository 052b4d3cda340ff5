//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Register hostnames under per-identity subdomains and publish the zone
///
/// Submissions are appended to a record store. `subzone zone` replays the
/// store and renders the zone file the nameserver loads.
#[derive(Parser, Debug)]
#[command(name = "subzone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long, env = "SUBZONE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Shared secret for credentials (or set SUBZONE_SECRET)
    #[arg(long, env = "SUBZONE_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a host list for an identity
    Submit(SubmitArgs),

    /// Compile the record store into a zone file
    Zone(ZoneArgs),

    /// Print the credential for an identity
    Pass(PassArgs),

    /// Mail an identity its credential
    Mail(MailArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

// ============================================================================
// Submit command
// ============================================================================

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Identity the hosts are published under
    #[arg(short, long)]
    pub identity: String,

    /// Credential issued for the identity
    #[arg(short = 'p', long)]
    pub credential: String,

    /// Comma-separated hostnames (at most 20)
    #[arg(long)]
    pub hosts: String,
}

// ============================================================================
// Zone command
// ============================================================================

#[derive(Args, Debug)]
pub struct ZoneArgs {
    /// Replace the configured zone file instead of printing to stdout
    #[arg(short, long)]
    pub write: bool,
}

// ============================================================================
// Pass command
// ============================================================================

#[derive(Args, Debug)]
pub struct PassArgs {
    /// Identity to derive the credential for
    pub identity: String,
}

// ============================================================================
// Mail command
// ============================================================================

#[derive(Args, Debug)]
pub struct MailArgs {
    /// Identity to notify
    pub identity: String,

    /// Print the message instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show the config file path
    Path,
}
