//! Loop state carried between cycles

use std::time::{SystemTime, UNIX_EPOCH};

/// Cursor and last notified message, owned by the polling loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherState {
    /// `from_date` sent with the next request (Unix seconds)
    pub cursor: i64,
    /// Text of the most recent sent or attempted notification
    pub last_message: String,
}

impl WatcherState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_message: String::new(),
        }
    }

    /// State for a fresh start: cursor at the current time
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }

    /// True when `message` differs from the last notified one
    pub fn is_new_message(&self, message: &str) -> bool {
        self.last_message != message
    }

    /// Move the cursor to the server-reported time. Never moves backwards.
    pub fn advance_cursor(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            if date < self.cursor {
                tracing::debug!(
                    "Ignoring current_date {} older than cursor {}",
                    date,
                    self.cursor
                );
            }
            self.cursor = self.cursor.max(date);
        }
    }

    pub fn remember(&mut self, message: String) {
        self.last_message = message;
    }
}

fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
