#[cfg(test)]
#[path = "event_bridge_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::StatusLine;
use super::UiState;
use crate::domain::models::HighlighterHandle;
use crate::domain::models::Notification;

pub struct EventBridge {
    notifications: mpsc::UnboundedReceiver<Notification>,
    highlighter: HighlighterHandle,
    status: StatusLine,
    // Last rendered markup, kept so a theme change can recolour code blocks.
    last_html: Option<String>,
}

impl EventBridge {
    pub fn new(
        notifications: mpsc::UnboundedReceiver<Notification>,
        highlighter: HighlighterHandle,
        status: StatusLine,
    ) -> EventBridge {
        return EventBridge {
            notifications,
            highlighter,
            status,
            last_html: None,
        };
    }

    pub fn status(&self) -> &StatusLine {
        return &self.status;
    }

    pub async fn recv(&mut self) -> Option<Notification> {
        return self.notifications.recv().await;
    }

    pub fn apply(&mut self, notification: Notification, state: &mut UiState) -> Result<()> {
        tracing::debug!(channel = %notification, "Backend notification");

        match notification {
            Notification::ContentUpdate(html) => {
                self.last_html = Some(html);
                self.refresh_preview(state)?;
            }
            Notification::StatusUpdate(message) => {
                self.status.show(&message)?;
            }
            Notification::Error(message) => {
                self.status.show_error(&message)?;
            }
            Notification::ThemeUpdate(dark_mode) => {
                state.apply_external_theme(dark_mode)?;
                self.refresh_preview(state)?;
            }
            Notification::TitleUpdate(title) => {
                state.view().set_title(&title)?;
            }
        }

        return Ok(());
    }

    pub fn refresh_preview(&self, state: &UiState) -> Result<()> {
        if let Some(html) = self.last_html.as_ref() {
            let markup = self
                .highlighter
                .highlight_code_blocks(html, state.theme.dark_mode);
            state.view().set_preview(&markup)?;
        }

        return Ok(());
    }
}
