//! `subzone zone` - compile the record store into a zone file.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::ZoneArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ZoneArgs) -> Result<()> {
    let store = ctx.open_store_for_replay().await?;
    let publisher = ctx.publisher().await?;

    if !args.write {
        // Zone text goes to stdout as-is so it can be redirected.
        let document = publisher.compile_from(&store).await?;
        print!("{}", document.text());
        return Ok(());
    }

    let document = publisher.publish(&store).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            let summary = json!({
                "path": publisher.zone_path(),
                "serial": document.serial(),
                "identities": document.identities(),
                "records": document.records(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} (serial {})",
                "Published".green().bold(),
                publisher.zone_path().display(),
                document.serial().to_string().cyan()
            );
            println!(
                "  {} identities, {} alias records",
                document.identities(),
                document.records()
            );
        }
    }

    Ok(())
}
