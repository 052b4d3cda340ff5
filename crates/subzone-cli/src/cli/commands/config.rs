//! `subzone config` - configuration inspection.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    // Never echo the secret itself.
    let mut config = ctx.config.clone();
    if config.auth.secret.is_some() {
        config.auth.secret = Some("****".to_string());
    }

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!("  {} {}", "file:".bold(), ctx.config_path.display());
            println!();

            let secret_display = if ctx.secret.is_some() {
                "(set)".to_string()
            } else {
                "(not set)".dimmed().to_string()
            };
            println!("  {} {}", "store.path:".bold(), config.store.path.display());
            println!("  {} {}", "zone.origin:".bold(), config.zone.origin);
            println!("  {} {}", "zone.path:".bold(), config.zone.path.display());
            println!(
                "  {} {}",
                "zone.template:".bold(),
                config
                    .zone
                    .template
                    .as_ref()
                    .map_or_else(|| "(built-in)".to_string(), |p| p.display().to_string())
            );
            println!("  {} {}", "zone.default_serial:".bold(), config.zone.default_serial);
            println!("  {} {}", "auth.secret:".bold(), secret_display);
            println!("  {} {}", "mail.command:".bold(), config.mail.command);
            println!("  {} {}", "mail.domain:".bold(), config.mail.domain);
            println!("  {} {} ({})", "log:".bold(), config.log.level, config.log.format);

            if ctx.verbose {
                println!();
                println!("{}", config.to_toml()?);
            }
        }
    }

    Ok(())
}
