/// Every failure the bot can observe.
///
/// Only `MissingCredential` and `InvalidConfig` are fatal, and only at
/// startup. Everything else is caught at the iteration boundary.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Missing required environment variable: {0}")]
    MissingCredential(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid cursor: {0}")]
    InvalidCursor(i64),
    #[error("Request to status API failed: {0}")]
    RequestFailure(#[source] reqwest::Error),
    #[error("Status API returned unexpected status code: {0}")]
    UnexpectedStatusCode(u16),
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    #[error("Delivery failed: {0}")]
    DeliveryFailure(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Startup errors stop the process; the rest are reported and retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingCredential(_) | Self::InvalidConfig(_))
    }
}
