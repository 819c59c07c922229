use std::sync::Arc;

use crate::errors::BotError;
use crate::services::notifier::Messenger;
use crate::services::tracker::Transition;

/// Builds user-facing texts and hands them to the messenger.
///
/// Holds no mutable state: the last delivered error text lives in the
/// polling loop and is lent in per call.
pub struct Notifier {
    messenger: Arc<dyn Messenger>,
    chat_id: String,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn Messenger>, chat_id: String) -> Self {
        Self { messenger, chat_id }
    }

    /// Always sends; every real status change is worth a message.
    pub async fn notify_transition(&self, transition: &Transition) -> Result<(), BotError> {
        let text = transition_message(transition);
        tracing::debug!("Sending status change for {}", transition.item_id);
        self.messenger.send(&self.chat_id, &text).await?;
        tracing::info!("Status change delivered: {}", text);
        Ok(())
    }

    /// Sends `message` unless it equals the last error that went out.
    ///
    /// `last` only moves on a successful delivery, so a failed attempt is
    /// retried on the next identical error instead of being suppressed.
    pub async fn notify_error(
        &self,
        message: &str,
        last: &mut Option<String>,
    ) -> Result<(), BotError> {
        if last.as_deref() == Some(message) {
            tracing::warn!("Suppressing repeated error notification");
            return Ok(());
        }

        self.messenger.send(&self.chat_id, message).await?;
        *last = Some(message.to_string());
        Ok(())
    }
}

pub fn transition_message(transition: &Transition) -> String {
    format!(
        "Изменился статус проверки работы \"{}\". {}",
        transition.item_name,
        transition.new_status.verdict()
    )
}

pub fn failure_message(error: &BotError) -> String {
    format!("Сбой в работе программы: {error}")
}
