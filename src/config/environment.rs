use std::env;
use std::time::Duration;

use crate::config::credentials::Credentials;
use crate::errors::BotError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment configuration
/// Built once at startup; never mutated afterwards
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the process environment (and `.env`, if any).
    ///
    /// Missing tokens are not an error here, the credential guard
    /// reports them. Malformed numeric settings are.
    pub fn from_env() -> Result<Self, BotError> {
        dotenvy::dotenv().ok();

        let credentials = Credentials {
            api_token: env::var("API_TOKEN").ok(),
            bot_token: env::var("BOT_TOKEN").ok(),
            chat_id: env::var("CHAT_ID").ok(),
        };

        let endpoint = env::var("API_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string());

        let retry_period = Duration::from_secs(secs_from_env(
            "RETRY_PERIOD_SECS",
            DEFAULT_RETRY_PERIOD_SECS,
        )?);
        let request_timeout = Duration::from_secs(secs_from_env(
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            credentials,
            endpoint,
            telegram_api_url,
            retry_period,
            request_timeout,
        })
    }
}

fn secs_from_env(name: &str, default: u64) -> Result<u64, BotError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| BotError::InvalidConfig(format!("{name} must be a whole number of seconds, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
