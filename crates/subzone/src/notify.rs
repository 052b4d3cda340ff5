//! Credential mail: render the message and hand it to the local MTA.

use std::process::Stdio;

use subzone_core::{Result, SubzoneError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::info;

use crate::config::MailConfig;

/// A rendered credential message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialMail {
    /// Envelope recipient.
    pub recipient: String,
    /// Full message, headers included.
    pub message: String,
}

impl CredentialMail {
    /// Render the message telling `identity` its credential.
    #[must_use]
    pub fn render(config: &MailConfig, origin: &str, identity: &str, credential: &str) -> Self {
        let recipient = format!("{identity}@{}", config.domain);
        let origin = origin.trim_end_matches('.');

        let mut message = format!(
            "To: {recipient}\n\
             From: {from}\n\
             Subject: Your {origin} password\n\
             \n\
             username: {identity}\n\
             password: {credential}\n",
            from = config.from,
        );
        if let Some(url) = &config.info_url {
            message.push_str(&format!("\nPlease see {url} for more details.\n"));
        }

        Self { recipient, message }
    }
}

/// Send `mail` by piping it into `config.command <recipient>`.
pub async fn send(config: &MailConfig, mail: &CredentialMail) -> Result<()> {
    let mut child = Command::new(&config.command)
        .arg(&mail.recipient)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| SubzoneError::Notify(format!("cannot run {}: {e}", config.command)))?;

    // An MTA that exits before reading is judged by its exit status.
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(mail.message.as_bytes()).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Err(e) => {
                return Err(SubzoneError::Notify(format!(
                    "writing to {}: {e}",
                    config.command
                )));
            }
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| SubzoneError::Notify(format!("waiting for {}: {e}", config.command)))?;
    if !status.success() {
        return Err(SubzoneError::Notify(format!(
            "{} exited with {status}",
            config.command
        )));
    }

    info!(recipient = %mail.recipient, "sent credential mail");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: &str) -> MailConfig {
        MailConfig {
            command: command.into(),
            domain: "example.edu".into(),
            from: "Hostmaster <hostmaster@example.org>".into(),
            info_url: Some("https://example.org/subzone".into()),
        }
    }

    #[test]
    fn test_render_message() {
        let mail = CredentialMail::render(&config("msmtpq"), "hosts.example.org.", "abc123", "Zm9v");
        assert_eq!(mail.recipient, "abc123@example.edu");
        assert!(mail.message.starts_with("To: abc123@example.edu\n"));
        assert!(mail.message.contains("Subject: Your hosts.example.org password\n"));
        assert!(mail.message.contains("\n\nusername: abc123\npassword: Zm9v\n"));
        assert!(mail.message.ends_with("Please see https://example.org/subzone for more details.\n"));
    }

    #[test]
    fn test_render_without_info_url() {
        let mut cfg = config("msmtpq");
        cfg.info_url = None;
        let mail = CredentialMail::render(&cfg, "hosts.example.org.", "abc123", "Zm9v");
        assert!(mail.message.ends_with("password: Zm9v\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_send_through_command() {
        let cfg = config("true");
        let mail = CredentialMail::render(&cfg, "hosts.example.org.", "abc123", "Zm9v");
        send(&cfg, &mail).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_send_reports_failed_command() {
        let cfg = config("false");
        let mail = CredentialMail::render(&cfg, "hosts.example.org.", "abc123", "Zm9v");
        assert!(matches!(send(&cfg, &mail).await, Err(SubzoneError::Notify(_))));
    }

    #[tokio::test]
    async fn test_send_reports_missing_command() {
        let cfg = config("/nonexistent/subzone-mta");
        let mail = CredentialMail::render(&cfg, "hosts.example.org.", "abc123", "Zm9v");
        assert!(matches!(send(&cfg, &mail).await, Err(SubzoneError::Notify(_))));
    }
}
