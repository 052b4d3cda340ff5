//! `subzone mail` - send an identity its credential.

use anyhow::Result;
use colored::Colorize;
use subzone::notify::{self, CredentialMail};
use subzone::validate::{normalize_identity, validate_identity};

use super::Context;
use crate::cli::args::MailArgs;

pub async fn execute(ctx: Context, args: MailArgs) -> Result<()> {
    let identity = normalize_identity(&args.identity);
    validate_identity(&identity)?;
    let credential = ctx.credential_key()?.derive(&identity);

    let mail = CredentialMail::render(
        &ctx.config.mail,
        &ctx.config.zone.origin,
        &identity,
        &credential,
    );

    if args.dry_run {
        print!("{}", mail.message);
        return Ok(());
    }

    notify::send(&ctx.config.mail, &mail).await?;
    println!("{} Credential sent to {}.", "Success:".green().bold(), mail.recipient.cyan());

    Ok(())
}
