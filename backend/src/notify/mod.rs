//! Transactional email notifications
//!
//! Notifications are best-effort: [`Notifier`] spawns each send on its own
//! task and only logs failures. Callers never wait for delivery and a
//! failed send never fails the request that triggered it.

mod sendgrid;

pub use sendgrid::SendGridMailer;

use crate::config::EmailConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
}

/// Outbound email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Transport used when no email provider is configured
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(to = %message.to, subject = %message.subject, "Email not sent (no provider configured)");
        Ok(())
    }
}

/// Fire-and-forget account notifications
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
        }
    }

    /// Pick SendGrid when an API key is configured, logging otherwise
    pub fn from_config(config: &EmailConfig) -> Self {
        let mailer: Arc<dyn Mailer> = match &config.sendgrid_api_key {
            Some(key) if !key.is_empty() => {
                Arc::new(SendGridMailer::new(key.clone(), config.sendgrid_url.clone()))
            }
            _ => {
                warn!("SENDGRID_API_KEY not set; account emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        Self::new(mailer, config.from_address.clone())
    }

    /// Welcome a freshly registered user
    pub fn send_welcome(&self, email: &str, name: &str) -> JoinHandle<()> {
        self.dispatch(EmailMessage {
            to: email.to_string(),
            from: self.from.clone(),
            subject: "Welcoming msg".to_string(),
            text: format!("Welcome {} to the app!", name),
        })
    }

    /// Say goodbye to a user who deleted their account
    pub fn send_cancellation(&self, email: &str, name: &str) -> JoinHandle<()> {
        self.dispatch(EmailMessage {
            to: email.to_string(),
            from: self.from.clone(),
            subject: "Good Bye".to_string(),
            text: format!(
                "We were pleased to have you among us, {}. You are welcome back anytime! \
                 If you want to let us know why you left or what we could have done to keep you, \
                 please feel free to reply to this email.",
                name
            ),
        })
    }

    /// Spawn the send; the handle may be dropped
    fn dispatch(&self, message: EmailMessage) -> JoinHandle<()> {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&message).await {
                warn!(to = %message.to, subject = %message.subject, error = %e, "Failed to send email");
            }
        })
    }
}
