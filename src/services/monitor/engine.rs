use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::errors::BotError;
use crate::modules::homework::validate;
use crate::services::monitor::PollState;
use crate::services::notifier::{failure_message, Notifier};
use crate::services::practicum::StatusSource;
use crate::services::tracker::diff;

/// What one pass of the loop ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iteration {
    /// Every transition was delivered and the cursor moved to server time
    Completed { notified: usize },
    /// Some transitions could not be delivered; they stay uncommitted and
    /// the cursor is held so the window is fetched again
    Incomplete { notified: usize, undelivered: usize },
    /// Fetch or validation failed; the failure was reported
    Failed { message: String },
}

pub struct MonitorEngine {
    source: Arc<dyn StatusSource>,
    notifier: Notifier,
    retry_period: Duration,
}

impl MonitorEngine {
    pub fn new(source: Arc<dyn StatusSource>, notifier: Notifier, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            retry_period,
        }
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Shutdown is only observed while sleeping, so an iteration in progress
    /// always finishes committing what it delivered.
    pub async fn run<F>(&self, mut state: PollState, shutdown: F) -> PollState
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            "Polling every {}s starting from {}",
            self.retry_period.as_secs(),
            state.cursor
        );

        loop {
            self.tick(&mut state).await;

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, polling stopped");
                    break;
                }
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        state
    }

    /// One iteration with every failure (panics included) captured and reported.
    pub async fn tick(&self, state: &mut PollState) -> Iteration {
        let outcome = AssertUnwindSafe(self.poll_once(state)).catch_unwind().await;

        match outcome {
            Ok(Ok(iteration)) => iteration,
            Ok(Err(e)) => self.report_failure(e, state).await,
            Err(panic) => {
                let e = BotError::Internal(panic_message(panic.as_ref()));
                self.report_failure(e, state).await
            }
        }
    }

    /// fetch → validate → diff → notify+commit → advance cursor.
    pub async fn poll_once(&self, state: &mut PollState) -> Result<Iteration, BotError> {
        let raw = self.source.fetch(state.cursor).await?;
        let payload = validate(&raw)?;
        let transitions = diff(&payload, &state.tracked);

        if transitions.is_empty() {
            tracing::debug!("Homework statuses unchanged");
        }

        let mut notified = 0;
        let mut undelivered = 0;
        for transition in &transitions {
            match self.notifier.notify_transition(transition).await {
                Ok(()) => {
                    state.tracked.commit(transition);
                    notified += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to deliver status change for {}: {}",
                        transition.item_id,
                        e
                    );
                    undelivered += 1;
                }
            }
        }

        if undelivered > 0 {
            return Ok(Iteration::Incomplete {
                notified,
                undelivered,
            });
        }

        state.advance_cursor(payload.current_date);
        Ok(Iteration::Completed { notified })
    }

    async fn report_failure(&self, error: BotError, state: &mut PollState) -> Iteration {
        let message = failure_message(&error);
        tracing::error!("{}", message);

        if let Err(e) = self
            .notifier
            .notify_error(&message, &mut state.last_error)
            .await
        {
            tracing::error!("Failed to deliver error notification: {}", e);
        }

        Iteration::Failed { message }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
