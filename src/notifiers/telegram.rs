use crate::core::errors::DeliveryError;
use crate::core::settings::TelegramSettings;
use crate::notifiers::Notifier;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        settings: &TelegramSettings,
        token: &str,
        chat_id: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let send_url = format!(
            "{}/bot{}/sendMessage",
            settings.api_url.trim_end_matches('/'),
            token
        );

        Ok(Self {
            client,
            send_url,
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .await
            // The URL embeds the bot token.
            .map_err(|e| DeliveryError::Transport(e.without_url()))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => {
                tracing::info!(text = message, "Message sent to Telegram");
                Ok(())
            }
            body => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: body
                    .and_then(|b| b.description)
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}
