#[cfg(test)]
#[path = "status_line_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;

use crate::domain::models::StatusMessage;
use crate::domain::models::ViewHandle;
use crate::domain::models::STATUS_READY;

/// The status area of the view. Every transient message starts its own revert
/// timer and earlier timers are never cancelled, so an older timer can clear
/// a newer message before that message's own timeout.
pub struct StatusLine {
    view: ViewHandle,
    timeout: Duration,
}

impl StatusLine {
    pub fn new(view: ViewHandle, timeout: Duration) -> StatusLine {
        return StatusLine { view, timeout };
    }

    pub fn ready(&self) -> Result<()> {
        return self.view.set_status(STATUS_READY);
    }

    pub fn show(&self, text: &str) -> Result<StatusMessage> {
        let message = StatusMessage::transient(text, self.timeout);
        self.view.set_status(&message.text)?;

        let view = self.view.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            time::sleep(timeout).await;
            if let Err(err) = view.set_status(STATUS_READY) {
                tracing::warn!(error = ?err, "Failed to reset status line");
            }
        });

        return Ok(message);
    }

    pub fn show_error(&self, text: &str) -> Result<StatusMessage> {
        tracing::error!(error = text, "Backend reported an error");

        let message = StatusMessage::error(text);
        self.view.set_status(&message.text)?;

        return Ok(message);
    }
}
