#[cfg(test)]
#[path = "local_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::configuration::Preferences;
use crate::domain::models::DialogHandle;
use crate::domain::models::DocumentBackend;
use crate::domain::models::Notification;
use crate::domain::services::PendingSync;

pub const APP_TITLE: &str = "markpad";
pub const DEFAULT_FILE_NAME: &str = "untitled.md";

pub fn window_title(path: Option<&Path>) -> String {
    let name = path
        .and_then(|p| return p.file_name())
        .map(|name| return name.to_string_lossy().to_string())
        .unwrap_or_else(|| return "Untitled".to_string());

    return format!("{APP_TITLE} - {name}");
}

/// Blank documents render to an empty string.
pub fn render_markdown(content: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Ok("".to_string());
    }

    return markdown::to_html_with_options(content, &markdown::Options::gfm())
        .map_err(|err| return anyhow!("Failed to render markdown: {err}"));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalSettings {
    pub dark_mode: bool,
    pub autosave_enabled: bool,
    pub autosave_delay: Duration,
}

#[derive(Debug, Default)]
struct DocumentState {
    path: Option<PathBuf>,
    content: String,
    dark_mode: bool,
    autosave_enabled: bool,
    // Bumped on every content change. Unsaved while it differs from
    // `saved_revision`.
    revision: u64,
    saved_revision: u64,
}

impl DocumentState {
    fn has_unsaved_changes(&self) -> bool {
        return self.revision != self.saved_revision;
    }

    fn replace(&mut self, path: Option<PathBuf>, content: String) {
        self.path = path;
        self.content = content;
        self.revision += 1;
        self.saved_revision = self.revision;
    }
}

#[derive(Clone)]
pub struct LocalDocument {
    state: Arc<Mutex<DocumentState>>,
    notifier: mpsc::UnboundedSender<Notification>,
    dialog: DialogHandle,
    autosave: Arc<PendingSync>,
    autosave_delay: Duration,
    preferences: Option<Arc<Preferences>>,
}

impl LocalDocument {
    pub fn new(
        notifier: mpsc::UnboundedSender<Notification>,
        dialog: DialogHandle,
        settings: LocalSettings,
    ) -> LocalDocument {
        return LocalDocument {
            state: Arc::new(Mutex::new(DocumentState {
                dark_mode: settings.dark_mode,
                autosave_enabled: settings.autosave_enabled,
                ..DocumentState::default()
            })),
            notifier,
            dialog,
            autosave: Arc::new(PendingSync::default()),
            autosave_delay: settings.autosave_delay,
            preferences: None,
        };
    }

    pub fn with_preferences(mut self, preferences: Arc<Preferences>) -> LocalDocument {
        self.preferences = Some(preferences);
        return self;
    }

    async fn remember_file(&self, path: &Path) {
        if let Some(preferences) = &self.preferences {
            if let Err(err) = preferences.add_recent_file(path).await {
                tracing::warn!(error = ?err, path = ?path, "Failed to record recent file");
            }
        }
    }

    async fn last_opened(&self) -> String {
        let preferences = match &self.preferences {
            Some(preferences) => preferences,
            None => return "".to_string(),
        };

        match preferences.recent_files().await {
            Ok(files) => {
                return files
                    .first()
                    .map(|path| return path.to_string_lossy().to_string())
                    .unwrap_or_default();
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to read recent files");
                return "".to_string();
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.send(notification) {
            tracing::warn!(channel = %err.0, "Notification dropped, no subscriber");
        }
    }

    async fn load(&self, path: &Path) -> Result<bool> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) => {
                tracing::error!(error = ?err, path = ?path, "Failed to read file");
                self.notify(Notification::Error(format!("Failed to open file: {err}")));
                return Ok(false);
            }
        };

        let html = render_markdown(&content)?;
        self.state
            .lock()
            .await
            .replace(Some(path.to_path_buf()), content);
        self.autosave.cancel();
        self.remember_file(path).await;

        self.notify(Notification::TitleUpdate(window_title(Some(path))));
        self.notify(Notification::ContentUpdate(html));
        self.notify(Notification::StatusUpdate("File opened".to_string()));

        return Ok(true);
    }

    async fn save_to(&self, path: &Path) -> Result<bool> {
        let mut state = self.state.lock().await;
        let revision = state.revision;

        if let Err(err) = fs::write(path, state.content.as_bytes()).await {
            tracing::error!(error = ?err, path = ?path, "Failed to write file");
            self.notify(Notification::Error(format!("Failed to save file: {err}")));
            return Ok(false);
        }

        state.saved_revision = revision;
        if state.path.as_deref() != Some(path) {
            state.path = Some(path.to_path_buf());
            self.notify(Notification::TitleUpdate(window_title(Some(path))));
        }
        self.notify(Notification::StatusUpdate("File saved".to_string()));

        return Ok(true);
    }

    pub async fn autosave_now(&self) -> Result<bool> {
        let mut state = self.state.lock().await;
        if !state.autosave_enabled || !state.has_unsaved_changes() {
            return Ok(false);
        }
        let path = match state.path.clone() {
            Some(path) => path,
            None => return Ok(false),
        };

        let revision = state.revision;
        if let Err(err) = fs::write(&path, state.content.as_bytes()).await {
            tracing::error!(error = ?err, path = ?path, "Autosave failed");
            self.notify(Notification::Error(format!("Failed to save file: {err}")));
            return Ok(false);
        }

        state.saved_revision = revision;
        self.notify(Notification::StatusUpdate("Auto-saved".to_string()));

        return Ok(true);
    }

    fn schedule_autosave(&self) {
        let document = self.clone();
        self.autosave.schedule(self.autosave_delay, async move {
            if let Err(err) = document.autosave_now().await {
                tracing::error!(error = ?err, "Autosave failed");
            }
        });
    }
}

#[async_trait]
impl DocumentBackend for LocalDocument {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.notifier.is_closed() {
            bail!("Notification channel is closed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn new_file(&self) -> Result<()> {
        self.state.lock().await.replace(None, "".to_string());
        self.autosave.cancel();

        self.notify(Notification::TitleUpdate(window_title(None)));
        self.notify(Notification::ContentUpdate("".to_string()));

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn open_file(&self) -> Result<bool> {
        let default_path = self.last_opened().await;
        match self.dialog.pick_open(&default_path).await? {
            Some(path) => return self.load(&path).await,
            None => return Ok(false),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn open_path(&self, path: &Path) -> Result<bool> {
        return self.load(path).await;
    }

    #[allow(clippy::implicit_return)]
    async fn save_file(&self) -> Result<bool> {
        let path = self.state.lock().await.path.clone();
        match path {
            Some(path) => return self.save_to(&path).await,
            None => return self.save_file_as().await,
        }
    }

    #[allow(clippy::implicit_return)]
    async fn save_file_as(&self) -> Result<bool> {
        let default_name = self
            .state
            .lock()
            .await
            .path
            .as_ref()
            .and_then(|p| return p.file_name())
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return DEFAULT_FILE_NAME.to_string());

        let path = match self.dialog.pick_save(&default_name).await? {
            Some(path) => path,
            None => return Ok(false),
        };

        let saved = self.save_to(&path).await?;
        if saved {
            self.remember_file(&path).await;
        }

        return Ok(saved);
    }

    #[allow(clippy::implicit_return)]
    async fn get_content(&self) -> Result<String> {
        return Ok(self.state.lock().await.content.to_string());
    }

    #[allow(clippy::implicit_return)]
    async fn set_content(&self, content: &str) -> Result<()> {
        // Render and notify under the lock so concurrent pushes commit and
        // reach the preview in the order they took it.
        let mut state = self.state.lock().await;
        let html = render_markdown(content)?;
        if state.content != content {
            state.content = content.to_string();
            state.revision += 1;
        }

        if state.autosave_enabled && state.has_unsaved_changes() {
            self.schedule_autosave();
        }
        self.notify(Notification::ContentUpdate(html));

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn toggle_theme(&self) -> Result<()> {
        let dark_mode = {
            let mut state = self.state.lock().await;
            state.dark_mode = !state.dark_mode;
            state.dark_mode
        };

        self.notify(Notification::ThemeUpdate(dark_mode));
        if let Some(preferences) = &self.preferences {
            if let Err(err) = preferences.save_theme(dark_mode).await {
                tracing::warn!(error = ?err, "Failed to persist theme");
            }
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn toggle_autosave(&self) -> Result<bool> {
        let enabled = {
            let mut state = self.state.lock().await;
            state.autosave_enabled = !state.autosave_enabled;
            state.autosave_enabled
        };

        if !enabled {
            self.autosave.cancel();
        }
        if let Some(preferences) = &self.preferences {
            if let Err(err) = preferences.save_autosave(enabled).await {
                tracing::warn!(error = ?err, "Failed to persist autosave");
            }
        }
        tracing::info!(enabled, "Autosave toggled");

        return Ok(enabled);
    }

    #[allow(clippy::implicit_return)]
    async fn shutdown(&self) -> Result<()> {
        self.autosave.cancel();
        self.autosave_now().await?;
        return Ok(());
    }
}
