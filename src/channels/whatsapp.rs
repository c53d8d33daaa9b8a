//! WhatsApp Cloud API client.
//!
//! Only the two calls the relay needs: send a text (optionally quoting a
//! message) and react to a message.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::WhatsAppConfig;
use crate::error::ChannelError;

const GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Outbound messaging used by the relay to act on a verdict.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Channel name for logs and errors.
    fn name(&self) -> &str;

    async fn send_text(
        &self,
        to: &str,
        body: &str,
        reply_to: Option<&str>,
    ) -> Result<(), ChannelError>;

    async fn react(&self, to: &str, message_id: &str, emoji: &str) -> Result<(), ChannelError>;
}

pub struct WhatsAppClient {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppClient {
    pub fn new(config: WhatsAppConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChannelError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{GRAPH_API_BASE}/{}/{}/messages",
            self.config.api_version, self.config.phone_number_id
        )
    }

    async fn post(&self, payload: &Value) -> Result<(), ChannelError> {
        debug!(url = %self.messages_url(), "WhatsApp API request");

        let resp = self
            .client
            .post(self.messages_url())
            .bearer_auth(self.config.access_token.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "whatsapp".into(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "whatsapp".into(),
                reason: format!("{status}: {body}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Outbound for WhatsAppClient {
    fn name(&self) -> &str {
        "whatsapp"
    }

    async fn send_text(
        &self,
        to: &str,
        body: &str,
        reply_to: Option<&str>,
    ) -> Result<(), ChannelError> {
        self.post(&text_payload(to, body, reply_to)).await?;
        info!(to, "WhatsApp message sent");
        Ok(())
    }

    async fn react(&self, to: &str, message_id: &str, emoji: &str) -> Result<(), ChannelError> {
        self.post(&reaction_payload(to, message_id, emoji)).await?;
        info!(message_id, emoji, "WhatsApp reaction sent");
        Ok(())
    }
}

/// Outbound that only logs. Lets the relay run without API credentials.
pub struct LogOnlyOutbound;

#[async_trait]
impl Outbound for LogOnlyOutbound {
    fn name(&self) -> &str {
        "log-only"
    }

    async fn send_text(
        &self,
        to: &str,
        body: &str,
        reply_to: Option<&str>,
    ) -> Result<(), ChannelError> {
        info!(to, body, reply_to, "Would send message (no WhatsApp credentials)");
        Ok(())
    }

    async fn react(&self, to: &str, message_id: &str, emoji: &str) -> Result<(), ChannelError> {
        info!(to, message_id, emoji, "Would react (no WhatsApp credentials)");
        Ok(())
    }
}

fn text_payload(to: &str, body: &str, reply_to: Option<&str>) -> Value {
    let mut payload = json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "text",
        "text": { "body": body },
    });
    if let Some(message_id) = reply_to {
        payload["context"] = json!({ "message_id": message_id });
    }
    payload
}

fn reaction_payload(to: &str, message_id: &str, emoji: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "reaction",
        "reaction": { "message_id": message_id, "emoji": emoji },
    })
}
