#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

use crate::domain::models::Event;
use crate::domain::models::FileDialog;
use crate::domain::models::View;
use crate::infrastructure::send_ui;

pub struct TerminalView {
    tx: mpsc::UnboundedSender<Event>,
}

impl TerminalView {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> TerminalView {
        return TerminalView { tx };
    }
}

#[async_trait]
impl View for TerminalView {
    fn set_preview(&self, html: &str) -> Result<()> {
        return send_ui(&self.tx, Event::ViewPreview(html.to_string()));
    }

    fn set_status(&self, text: &str) -> Result<()> {
        return send_ui(&self.tx, Event::ViewStatus(text.to_string()));
    }

    fn set_word_count(&self, label: &str) -> Result<()> {
        return send_ui(&self.tx, Event::ViewWordCount(label.to_string()));
    }

    fn set_dark_theme(&self, dark_mode: bool) -> Result<()> {
        return send_ui(&self.tx, Event::ViewDarkTheme(dark_mode));
    }

    fn set_autosave(&self, label: &str) -> Result<()> {
        return send_ui(&self.tx, Event::ViewAutosave(label.to_string()));
    }

    fn set_title(&self, title: &str) -> Result<()> {
        return send_ui(&self.tx, Event::ViewTitle(title.to_string()));
    }

    /// A dismissed prompt counts as declined.
    #[allow(clippy::implicit_return)]
    async fn confirm(&self, message: &str) -> Result<bool> {
        let (tx, rx) = oneshot::channel::<bool>();
        send_ui(&self.tx, Event::PromptConfirm(message.to_string(), tx))?;

        return Ok(rx.await.unwrap_or(false));
    }
}

pub struct TerminalDialogs {
    tx: mpsc::UnboundedSender<Event>,
}

impl TerminalDialogs {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> TerminalDialogs {
        return TerminalDialogs { tx };
    }

    async fn prompt(&self, message: &str, default_value: &str) -> Result<Option<PathBuf>> {
        let (tx, rx) = oneshot::channel::<Option<PathBuf>>();
        send_ui(
            &self.tx,
            Event::PromptPath(message.to_string(), default_value.to_string(), tx),
        )?;

        let path = rx.await.unwrap_or(None);
        return Ok(path.filter(|p| return !p.as_os_str().is_empty()));
    }
}

#[async_trait]
impl FileDialog for TerminalDialogs {
    #[allow(clippy::implicit_return)]
    async fn pick_open(&self, default_path: &str) -> Result<Option<PathBuf>> {
        return self.prompt("Open file", default_path).await;
    }

    #[allow(clippy::implicit_return)]
    async fn pick_save(&self, default_name: &str) -> Result<Option<PathBuf>> {
        return self.prompt("Save as", default_name).await;
    }
}
