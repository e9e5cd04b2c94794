use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::sentiment::SentimentSummary;

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;
pub const BANNER: &str = "📰 Daily Football News and Sentiment Analysis:";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to set up SMTP session: {0}")]
    Connection(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

impl Digest {
    pub fn build(lines: &[String], summary: &SentimentSummary, date: NaiveDate) -> Self {
        Digest {
            subject: format!(
                "Daily Football News Summary - {}",
                date.format("%Y-%m-%d")
            ),
            body: format!("{}\n\n{}\n\n{}", BANNER, lines.join("\n"), summary),
        }
    }
}

/// One sender, one recipient, one digest.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub digest: Digest,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver the envelope. Implementations must release their session
    /// before returning, whether or not delivery succeeded.
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError>;
}

/// STARTTLS submission through Gmail. A fresh connection is opened for each
/// send and closed when the call returns.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(SMTP_HOST, SMTP_PORT, config)
    }

    #[doc(hidden)]
    pub fn with_endpoint(host: &str, port: u16, config: &Config) -> Self {
        SmtpMailer {
            host: host.to_string(),
            port,
            credentials: Credentials::new(
                config.sender_email.clone(),
                config.sender_password.clone(),
            ),
        }
    }

    pub fn build_message(envelope: &Envelope) -> Result<Message, MailError> {
        let from: Mailbox = envelope
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(envelope.from.clone()))?;
        let to: Mailbox = envelope
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(envelope.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(envelope.digest.subject.clone())
            .multipart(MultiPart::mixed().singlepart(SinglePart::plain(
                envelope.digest.body.clone(),
            )))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        let message = Self::build_message(envelope)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| MailError::Connection(e.to_string()))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        debug!("Submitting digest via {}:{}", self.host, self.port);
        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;
        debug!("SMTP server replied {}", response.code());
        Ok(())
    }
}

pub struct Notifier<T> {
    transport: T,
    sender: String,
    recipient: String,
}

impl<T> Notifier<T> {
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Notifier {
            transport,
            sender: config.sender_email.clone(),
            recipient: config.recipient_email.clone(),
        }
    }

    pub async fn send_digest(
        &self,
        lines: &[String],
        summary: &SentimentSummary,
    ) -> Result<Digest, MailError> {
        self.send_digest_on(lines, summary, Local::now().date_naive())
            .await
    }

    /// Same as `send_digest` with an explicit date for the subject line.
    pub async fn send_digest_on(
        &self,
        lines: &[String],
        summary: &SentimentSummary,
        date: NaiveDate,
    ) -> Result<Digest, MailError> {
        let envelope = Envelope {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            digest: Digest::build(lines, summary, date),
        };

        match self.transport.send(&envelope).await {
            Ok(()) => {
                info!("Email sent successfully to {}", envelope.to);
                Ok(envelope.digest)
            }
            Err(e) => {
                error!("Error sending email: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn test_config() -> Config {
        Config {
            sender_email: "sender@example.com".to_string(),
            sender_password: "app-password".to_string(),
            recipient_email: "reader@example.com".to_string(),
            news_api_key: "news-key".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    /// Session handle that counts itself closed when dropped
    struct Session<'a> {
        closed: &'a AtomicUsize,
    }

    impl Drop for Session<'_> {
        fn drop(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct FakeTransport {
        reject_auth: bool,
        opened: AtomicUsize,
        closed: AtomicUsize,
        delivered: Mutex<Vec<Envelope>>,
    }

    #[async_trait]
    impl MailTransport for FakeTransport {
        async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            let _session = Session {
                closed: &self.closed,
            };
            if self.reject_auth {
                return Err(MailError::Smtp(
                    "535 5.7.8 Username and Password not accepted".to_string(),
                ));
            }
            self.delivered.lock().unwrap().push(envelope.clone());
            Ok(())
        }
    }

    fn summary(positive: usize, negative: usize, neutral: usize) -> SentimentSummary {
        SentimentSummary {
            positive,
            negative,
            neutral,
        }
    }

    #[test]
    fn test_digest_subject_and_body() {
        let lines = vec![
            "Positive: Team A wins big (Polarity: 0.60)".to_string(),
            "Negative: Star player injured (Polarity: -0.60)".to_string(),
        ];
        let digest = Digest::build(&lines, &summary(1, 1, 0), date());

        assert_eq!(digest.subject, "Daily Football News Summary - 2026-10-15");
        assert_eq!(
            digest.body,
            "📰 Daily Football News and Sentiment Analysis:\n\n\
             Positive: Team A wins big (Polarity: 0.60)\n\
             Negative: Star player injured (Polarity: -0.60)\n\n\
             Sentiment Summary: 50.0% Positive, 50.0% Negative, 0.0% Neutral"
        );
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let envelope = Envelope {
            from: "not an address".to_string(),
            to: "reader@example.com".to_string(),
            digest: Digest::build(&[], &summary(0, 0, 0), date()),
        };
        let err = SmtpMailer::build_message(&envelope).unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(ref a) if a == "not an address"));
    }

    #[test]
    fn test_build_message_is_multipart_plain_text() {
        let envelope = Envelope {
            from: "sender@example.com".to_string(),
            to: "reader@example.com".to_string(),
            digest: Digest::build(&["Neutral: x (Polarity: 0.00)".to_string()], &summary(0, 0, 1), date()),
        };
        let message = SmtpMailer::build_message(&envelope).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("Daily Football News Summary - 2026-10-15"));
    }

    #[tokio::test]
    async fn test_send_digest_success() {
        let notifier = Notifier::new(FakeTransport::default(), &test_config());
        let digest = notifier
            .send_digest_on(&["Neutral: x (Polarity: 0.00)".to_string()], &summary(0, 0, 1), date())
            .await
            .unwrap();

        let delivered = notifier.transport.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].from, "sender@example.com");
        assert_eq!(delivered[0].to, "reader@example.com");
        assert_eq!(delivered[0].digest, digest);
        assert_eq!(notifier.transport.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_releases_session_and_propagates() {
        let transport = FakeTransport {
            reject_auth: true,
            ..Default::default()
        };
        let notifier = Notifier::new(transport, &test_config());

        let err = notifier
            .send_digest_on(&[], &summary(0, 0, 0), date())
            .await
            .unwrap_err();

        assert!(matches!(err, MailError::Smtp(_)));
        assert_eq!(notifier.transport.opened.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.transport.closed.load(Ordering::SeqCst), 1);
        assert!(notifier.transport.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_smtp_mailer_unreachable_server_is_error() {
        let mailer = SmtpMailer::with_endpoint("127.0.0.1", 9, &test_config());
        let envelope = Envelope {
            from: "sender@example.com".to_string(),
            to: "reader@example.com".to_string(),
            digest: Digest::build(&[], &summary(0, 0, 0), date()),
        };
        assert!(mailer.send(&envelope).await.is_err());
    }
}
