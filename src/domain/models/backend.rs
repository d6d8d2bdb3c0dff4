use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// Failures the user should see are pushed as `error` notifications and
/// reported as `Ok(false)`; an `Err` means the call itself could not complete.
#[async_trait]
pub trait DocumentBackend {
    async fn health_check(&self) -> Result<()>;

    async fn new_file(&self) -> Result<()>;

    async fn open_file(&self) -> Result<bool>;

    async fn open_path(&self, path: &Path) -> Result<bool>;

    async fn save_file(&self) -> Result<bool>;

    async fn save_file_as(&self) -> Result<bool>;

    async fn get_content(&self) -> Result<String>;

    /// Stores the content and re-renders the preview. Safe to repeat with the
    /// same content.
    async fn set_content(&self, content: &str) -> Result<()>;

    async fn toggle_theme(&self) -> Result<()>;

    async fn toggle_autosave(&self) -> Result<bool>;

    async fn shutdown(&self) -> Result<()>;
}

pub type BackendHandle = Arc<dyn DocumentBackend + Send + Sync>;

/// File pickers used by a backend to ask the user for a path. `None` means the
/// user cancelled.
#[async_trait]
pub trait FileDialog {
    async fn pick_open(&self, default_path: &str) -> Result<Option<PathBuf>>;

    async fn pick_save(&self, default_name: &str) -> Result<Option<PathBuf>>;
}

pub type DialogHandle = Arc<dyn FileDialog + Send + Sync>;
