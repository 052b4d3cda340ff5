//! `subzone pass` - print the credential for an identity.

use anyhow::Result;
use serde_json::json;
use subzone::validate::{normalize_identity, validate_identity};

use super::Context;
use crate::cli::args::PassArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: PassArgs) -> Result<()> {
    let identity = normalize_identity(&args.identity);
    validate_identity(&identity)?;
    let credential = ctx.credential_key()?.derive(&identity);

    match ctx.output_format {
        OutputFormat::Json => {
            let out = json!({ "identity": identity, "credential": credential });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Pretty => println!("{credential}"),
    }

    Ok(())
}
