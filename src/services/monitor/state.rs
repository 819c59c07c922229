use crate::services::tracker::TrackedState;

/// Everything the polling loop remembers between iterations.
/// Owned by the loop and lent out as `&mut` to one iteration at a time.
#[derive(Debug, Default)]
pub struct PollState {
    /// Lower bound (unix seconds) of the next query window
    pub cursor: i64,
    pub tracked: TrackedState,
    /// Text of the last error notification that was delivered
    pub last_error: Option<String>,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    pub fn starting_now() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }

    pub fn advance_cursor(&mut self, server_time: i64) {
        if server_time != self.cursor {
            tracing::info!("Cursor advanced {} -> {}", self.cursor, server_time);
        }
        self.cursor = server_time;
    }
}
