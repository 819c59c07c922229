pub mod config;
pub mod errors;
pub mod modules;
pub mod services;

use std::sync::Arc;

use config::{Config, VerifiedCredentials};
use services::monitor::MonitorEngine;
use services::notifier::{Notifier, TelegramMessenger};
use services::practicum::PracticumClient;

/// Wires the production collaborators into a polling engine.
pub fn create_engine(config: &Config, credentials: &VerifiedCredentials) -> MonitorEngine {
    let source = Arc::new(PracticumClient::new(
        config.endpoint.clone(),
        credentials.api_token.clone(),
        config.request_timeout,
    ));

    let messenger = Arc::new(TelegramMessenger::new(
        config.telegram_api_url.clone(),
        credentials.bot_token.clone(),
        config.request_timeout,
    ));
    let notifier = Notifier::new(messenger, credentials.chat_id.clone());

    MonitorEngine::new(source, notifier, config.retry_period)
}
