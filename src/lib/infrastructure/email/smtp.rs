//! SMTP email transport implementation

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{AsyncSmtpConnection, TlsParameters},
        commands::{Data, Mail, Rcpt},
        extension::ClientId,
        Error as SmtpError,
    },
    Address,
};
use tracing::{debug, warn};

use crate::domain::communication::{
    emails::{EmailMessage, ValidationError},
    mailer::{errors::SendError, Mailer},
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username, also used as the envelope sender
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: String,

    /// The From header address
    #[clap(long, env = "SMTP_SENDER")]
    pub sender: String,

    /// Report success without touching the network
    #[clap(long, env = "SMTP_TEST_MODE", default_value = "false")]
    pub test_mode: bool,
}

/// SMTP mailer
///
/// Delivers each message over a fresh implicit-TLS session with PLAIN
/// authentication. Certificate verification is always on. Only the first
/// listed recipient is addressed; there is no pooling and no retry.
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Opens the TLS connection and reads the server greeting and EHLO
    /// response.
    async fn connect(&self) -> Result<AsyncSmtpConnection, SendError> {
        let tls = TlsParameters::new(self.config.host.clone()).map_err(SendError::Connect)?;

        AsyncSmtpConnection::connect_tokio1(
            (self.config.host.as_str(), self.config.port),
            None,
            &ClientId::default(),
            Some(tls),
            None,
        )
        .await
        .map_err(classify_connect)
    }

    /// Runs the authenticated envelope and data exchange on an open
    /// session. Any step failure skips the remaining steps.
    async fn transcript(
        &self,
        conn: &mut AsyncSmtpConnection,
        sender: Address,
        recipient: Address,
        payload: &[u8],
    ) -> Result<(), SendError> {
        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        conn.auth(&[Mechanism::Plain], &credentials)
            .await
            .map_err(SendError::Authentication)?;

        conn.command(Mail::new(Some(sender), vec![]))
            .await
            .map_err(SendError::Sender)?;

        conn.command(Rcpt::new(recipient, vec![]))
            .await
            .map_err(SendError::Recipient)?;

        conn.command(Data).await.map_err(SendError::DataStream)?;

        conn.message(payload).await.map_err(classify_message)?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), SendError> {
        if self.config.test_mode {
            debug!("test mode: skipping delivery");

            return Ok(());
        }

        message.validate()?;

        let recipient = message
            .first_recipient()
            .ok_or(ValidationError::NoRecipients)?;

        if message.recipients.len() > 1 {
            warn!(
                "only the first recipient is addressed; dropping {} additional recipient(s)",
                message.recipients.len() - 1
            );
        }

        let sender: Address =
            self.config
                .username
                .parse()
                .map_err(|source| SendError::SenderAddress {
                    address: self.config.username.clone(),
                    source,
                })?;

        let to: Address = recipient
            .parse()
            .map_err(|source| SendError::RecipientAddress {
                address: recipient.to_string(),
                source,
            })?;

        let payload = format_payload(
            &self.config.sender,
            recipient,
            &message.subject,
            &message.body,
        );

        let mut conn = self.connect().await?;

        let result = self
            .transcript(&mut conn, sender, to, payload.as_bytes())
            .await;

        // The session is released on every exit path: QUIT on success,
        // best-effort abort on failure, socket closed on drop.
        match &result {
            Ok(()) => {
                let _ = conn.quit().await;
            }
            Err(_) => conn.abort().await,
        }

        result
    }
}

/// Formats the message payload.
///
/// The subject is emitted as a bare header line and the MIME headers are
/// LF-separated; downstream consumers expect these exact bytes.
fn format_payload(from: &str, to: &str, subject: &str, body: &str) -> String {
    format!(
        "From: {from}\r\nTo: {to}\r\n{subject}\nMIME-version: 1.0;\nContent-Type: text/html; charset=\"UTF-8\";\n\n{body}"
    )
}

/// Connection establishment covers the TCP dial, the TLS handshake and
/// the greeting/EHLO exchange in one call. Transport-level failures are
/// `Connect`; SMTP-level rejections of the session are `Session`.
fn classify_connect(err: SmtpError) -> SendError {
    if err.is_permanent() || err.is_transient() || err.is_response() || err.is_client() {
        SendError::Session(err)
    } else {
        SendError::Connect(err)
    }
}

/// The payload and the end-of-data marker go out in one call. An
/// SMTP-level rejection can only be the reply to the terminating dot;
/// anything else failed while writing.
fn classify_message(err: SmtpError) -> SendError {
    if err.is_permanent() || err.is_transient() || err.is_response() {
        SendError::Finalize(err)
    } else {
        SendError::Write(err)
    }
}
