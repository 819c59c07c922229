use std::fmt;

use crate::errors::BotError;

/// Secrets needed to talk to the status API and the bot API
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_token: Option<String>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

/// Credentials that passed [`Credentials::verify`]
#[derive(Clone)]
pub struct VerifiedCredentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Fails on the first absent or empty secret, naming its variable.
    pub fn verify(&self) -> Result<VerifiedCredentials, BotError> {
        let api_token = required("API_TOKEN", &self.api_token)?;
        let bot_token = required("BOT_TOKEN", &self.bot_token)?;
        let chat_id = required("CHAT_ID", &self.chat_id)?;

        Ok(VerifiedCredentials {
            api_token,
            bot_token,
            chat_id,
        })
    }
}

fn required(name: &'static str, value: &Option<String>) -> Result<String, BotError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(BotError::MissingCredential(name)),
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<missing>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &redact(&self.api_token))
            .field("bot_token", &redact(&self.bot_token))
            .field("chat_id", &redact(&self.chat_id))
            .finish()
    }
}

impl fmt::Debug for VerifiedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifiedCredentials")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}
