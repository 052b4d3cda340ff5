//! `subzone submit` - record a host list for an identity.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use subzone::{Receipt, Registrar, Submission};

use super::Context;
use crate::cli::args::SubmitArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: SubmitArgs) -> Result<()> {
    let key = ctx.credential_key()?;
    let store = ctx.open_store().await?;
    let registrar = Registrar::new(Arc::clone(&store), key, ctx.config.zone.origin.clone());

    let submission = Submission {
        identity: args.identity,
        credential: args.credential,
        hosts: args.hosts,
    };
    let receipt = registrar.submit(&submission).await?;

    drop(registrar);
    if let Ok(store) = Arc::try_unwrap(store) {
        store.close().await?;
    }

    print_receipt(&ctx, &receipt)
}

fn print_receipt(ctx: &Context, receipt: &Receipt) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(receipt)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Update successful:".green().bold());
            for (alias, host) in receipt.mappings() {
                println!("  {} => {}", alias.cyan(), host);
            }
            println!();
            println!(
                "{}",
                "These aliases appear after the next zone publish.".dimmed()
            );
        }
    }
    Ok(())
}
