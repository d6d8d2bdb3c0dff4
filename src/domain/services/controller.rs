#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::ChangeEmitter;
use super::EventBridge;
use super::RemoteDocumentFacade;
use super::StatusLine;
use super::UiState;
use crate::domain::models::Action;
use crate::domain::models::BackendHandle;
use crate::domain::models::Command;
use crate::domain::models::EditorHandle;
use crate::domain::models::HighlighterHandle;
use crate::domain::models::Notification;
use crate::domain::models::ViewHandle;

pub const UNSAVED_CHANGES_PROMPT: &str = "You have unsaved changes. Do you want to continue?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub quiet_interval: Duration,
    pub status_timeout: Duration,
    pub dark_mode: bool,
    pub autosave_enabled: bool,
}

impl Default for SessionSettings {
    fn default() -> SessionSettings {
        return SessionSettings {
            quiet_interval: Duration::from_millis(300),
            status_timeout: Duration::from_millis(3000),
            dark_mode: false,
            autosave_enabled: true,
        };
    }
}

pub struct SessionParts {
    pub backend: BackendHandle,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
    pub view: ViewHandle,
    pub editor: EditorHandle,
    pub highlighter: HighlighterHandle,
}

pub struct SessionController {
    state: UiState,
    facade: Arc<RemoteDocumentFacade>,
    emitter: ChangeEmitter,
    bridge: EventBridge,
}

impl SessionController {
    pub fn new(parts: SessionParts, settings: SessionSettings) -> SessionController {
        let facade = Arc::new(RemoteDocumentFacade::new(parts.backend));
        let status = StatusLine::new(parts.view.clone(), settings.status_timeout);

        return SessionController {
            state: UiState::new(
                parts.view,
                parts.editor,
                settings.dark_mode,
                settings.autosave_enabled,
            ),
            emitter: ChangeEmitter::new(facade.clone(), settings.quiet_interval),
            bridge: EventBridge::new(parts.notifications, parts.highlighter, status),
            facade,
        };
    }

    pub fn state(&self) -> &UiState {
        return &self.state;
    }

    pub async fn start_up(&mut self) -> Result<()> {
        if let Err(err) = self.facade.health_check().await {
            tracing::error!(error = ?err, "Backend health check failed");
            self.bridge
                .status()
                .show_error(&format!("Backend is not available: {err}"))?;
        } else {
            self.bridge.status().ready()?;
        }

        self.state.render()?;
        self.state.focus_editor()?;

        return Ok(());
    }

    pub fn on_editor_change(&mut self, content: String, generation: u64) -> Result<()> {
        if self.state.record_edit(content.clone(), generation)? {
            self.emitter.schedule_push(content);
        }
        return Ok(());
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        tracing::debug!(command = %command, dirty = self.state.session.dirty, "Dispatch");

        match command {
            Command::New => return self.new_document().await,
            Command::Open => return self.open().await,
            Command::Save => return self.save(false).await,
            Command::SaveAs => return self.save(true).await,
            Command::ToggleTheme => return self.toggle_theme().await,
            Command::ToggleAutosave => return self.toggle_autosave().await,
        }
    }

    pub fn handle_notification(&mut self, notification: Notification) -> Result<()> {
        return self.bridge.apply(notification, &mut self.state);
    }

    pub async fn next_notification(&mut self) -> Option<Notification> {
        return self.bridge.recv().await;
    }

    pub async fn open_initial(&mut self, path: &Path) -> Result<()> {
        match self.facade.open_path(path).await {
            Ok(true) => return self.load_backend_content().await,
            Ok(false) => return Ok(()),
            Err(err) => {
                tracing::error!(error = ?err, path = ?path, "Open request failed");
                return Ok(());
            }
        }
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        tracing::debug!(
            pending = self.emitter.is_pending(),
            dirty = self.state.session.dirty,
            "Session shutting down"
        );

        if let Err(err) = self.emitter.flush().await {
            tracing::error!(error = ?err, "Failed to push editor content on shutdown");
        }

        return self.facade.shutdown().await;
    }

    async fn confirm_discard(&self) -> Result<bool> {
        if !self.state.needs_discard_confirmation() {
            return Ok(true);
        }

        return self.state.view().confirm(UNSAVED_CHANGES_PROMPT).await;
    }

    async fn new_document(&mut self) -> Result<()> {
        if !self.confirm_discard().await? {
            return Ok(());
        }

        self.emitter.cancel();
        if let Err(err) = self.facade.new_document().await {
            tracing::error!(error = ?err, "New document request failed");
        }

        self.state.replace_document("")?;
        return Ok(());
    }

    async fn open(&mut self) -> Result<()> {
        if !self.confirm_discard().await? {
            return Ok(());
        }

        if let Err(err) = self.emitter.flush().await {
            tracing::error!(error = ?err, "Failed to push editor content before opening");
        }

        match self.facade.open().await {
            Ok(true) => return self.load_backend_content().await,
            Ok(false) => return Ok(()),
            Err(err) => {
                tracing::error!(error = ?err, "Open request failed");
                return Ok(());
            }
        }
    }

    async fn load_backend_content(&mut self) -> Result<()> {
        match self.facade.get_content().await {
            Ok(content) => {
                self.state.replace_document(&content)?;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to fetch document content");
            }
        }

        return Ok(());
    }

    async fn save(&mut self, save_as: bool) -> Result<()> {
        if let Err(err) = self.emitter.flush().await {
            tracing::error!(error = ?err, "Failed to push editor content before saving");
        }

        let res = if save_as {
            self.facade.save_as().await
        } else {
            self.facade.save().await
        };

        match res {
            Ok(true) => {
                self.state.mark_saved();
            }
            Ok(false) => {
                tracing::debug!(save_as, "Save did not complete");
            }
            Err(err) => {
                tracing::error!(error = ?err, save_as, "Save request failed");
            }
        }

        return Ok(());
    }

    async fn toggle_theme(&mut self) -> Result<()> {
        self.state.toggle_theme()?;
        self.bridge.refresh_preview(&self.state)?;
        if let Err(err) = self.facade.toggle_theme().await {
            tracing::error!(error = ?err, "Toggle theme request failed");
        }

        return Ok(());
    }

    async fn toggle_autosave(&mut self) -> Result<()> {
        match self.facade.toggle_autosave().await {
            Ok(enabled) => {
                self.state.set_autosave(enabled)?;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Toggle autosave request failed");
            }
        }

        return Ok(());
    }
}

/// Drives a session from UI actions and backend notifications on a single
/// task, so handlers never interleave between suspension points.
pub struct SessionService {}

impl SessionService {
    pub async fn start(
        mut controller: SessionController,
        initial_file: Option<PathBuf>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        controller.start_up().await?;
        if let Some(path) = initial_file {
            controller.open_initial(&path).await?;
        }

        loop {
            tokio::select! {
                action = rx.recv() => {
                    let res = match action {
                        Some(Action::EditorChanged(content, generation)) => {
                            controller.on_editor_change(content, generation)
                        }
                        Some(Action::Command(command)) => controller.dispatch(command).await,
                        None => break,
                    };

                    if let Err(err) = res {
                        tracing::error!(error = ?err, "Failed to handle UI action");
                    }
                }
                Some(notification) = controller.next_notification() => {
                    if let Err(err) = controller.handle_notification(notification) {
                        tracing::error!(error = ?err, "Failed to apply backend notification");
                    }
                }
            }
        }

        controller.shutdown().await?;
        return Ok(());
    }
}
