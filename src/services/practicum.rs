use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::errors::BotError;

/// Anything that can answer "what changed since `cursor`?"
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, cursor: i64) -> Result<serde_json::Value, BotError>;
}

/// Practicum homework status API client
/// One GET per call; retrying is the polling loop's business
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl PracticumClient {
    pub fn new(endpoint: String, api_token: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<serde_json::Value, BotError> {
        if cursor < 0 {
            return Err(BotError::InvalidCursor(cursor));
        }

        tracing::debug!("Requesting homework statuses from_date={}", cursor);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.api_token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(BotError::RequestFailure)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::UnexpectedStatusCode(status.as_u16()));
        }

        let body = response.bytes().await.map_err(BotError::RequestFailure)?;
        serde_json::from_slice(&body).map_err(|e| BotError::MalformedBody(e.to_string()))
    }
}
