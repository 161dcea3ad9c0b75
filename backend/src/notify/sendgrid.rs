//! SendGrid v3 mail transport

use super::{EmailMessage, Mailer};
use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::time::Duration;

/// Sends mail through the SendGrid `mail/send` endpoint
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: SecretString,
    url: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: SecretString::new(api_key),
            url,
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let body = json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.text }],
        });

        self.client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("SendGrid request failed")?
            .error_for_status()
            .context("SendGrid rejected the message")?;

        Ok(())
    }
}
