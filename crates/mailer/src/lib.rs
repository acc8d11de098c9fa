//! Email delivery over authenticated STARTTLS SMTP.
//!
//! One message per run: a plain-text body plus the screenshot as a
//! base64-encoded attachment named after the source file. Transport failures
//! are not retried.

use std::fs;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use shotwire_core::{OutboundEmail, ReportMailer, ShotError};

/// SMTP mailer with a fixed sender and recipient.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        from_email: &str,
        to_email: &str,
    ) -> Result<Self, ShotError> {
        let from = from_email.parse::<Mailbox>().map_err(|e| {
            ShotError::Config(format!("invalid sender address \"{from_email}\": {e}"))
        })?;
        let to = to_email
            .parse::<Mailbox>()
            .map_err(|e| ShotError::Config(format!("invalid recipient address \"{to_email}\": {e}")))?;

        Ok(Self {
            host: host.into(),
            port,
            credentials: Credentials::new(username.into(), password.into()),
            from,
            to,
        })
    }

    /// Assemble the multipart message: one plain-text body part plus, when an
    /// attachment path is present, one binary part named after its base name.
    pub fn build_message(&self, email: &OutboundEmail) -> Result<Message, ShotError> {
        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));

        if let Some(path) = &email.attachment {
            let content = fs::read(path)?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            let content_type = ContentType::parse("application/octet-stream")
                .map_err(|e| ShotError::Delivery(e.to_string()))?;
            multipart = multipart.singlepart(Attachment::new(filename).body(content, content_type));
        }

        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.as_str())
            .multipart(multipart)
            .map_err(|e| ShotError::Delivery(e.to_string()))
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ShotError> {
        let message = self.build_message(email)?;

        let transport = SmtpTransport::starttls_relay(&self.host)
            .map_err(|e| ShotError::Delivery(e.to_string()))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        transport
            .send(&message)
            .map_err(|e| ShotError::Delivery(e.to_string()))?;

        info!(to = %self.to, subject = %email.subject, "email sent");
        Ok(())
    }
}
