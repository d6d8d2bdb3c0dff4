use std::time::Duration;

use tokio::time::Instant;

pub const STATUS_READY: &str = "Ready";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    /// When the status line reverts to `STATUS_READY`. Errors never expire.
    pub expires_at: Option<Instant>,
}

impl StatusMessage {
    pub fn transient(text: &str, timeout: Duration) -> StatusMessage {
        return StatusMessage {
            text: text.to_string(),
            expires_at: Some(Instant::now() + timeout),
        };
    }

    pub fn error(message: &str) -> StatusMessage {
        return StatusMessage {
            text: format!("Error: {message}"),
            expires_at: None,
        };
    }
}
