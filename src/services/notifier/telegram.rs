use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::BotError;

/// The one capability the bot needs from a chat service
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), BotError>;
}

/// Telegram Bot API client
pub struct TelegramMessenger {
    client: Client,
    api_url: String,
    bot_token: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramMessenger {
    pub fn new(api_url: String, bot_token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_url,
            bot_token,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), BotError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            // without_url: the request URL embeds the bot token
            .map_err(|e| BotError::DeliveryFailure(e.without_url().to_string()))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse { description: Some(description), .. }) => Err(
                BotError::DeliveryFailure(format!("Bot API returned {status}: {description}")),
            ),
            _ => Err(BotError::DeliveryFailure(format!(
                "Bot API returned {status}"
            ))),
        }
    }
}
