#[cfg(test)]
#[path = "facade_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;

use crate::domain::models::BackendHandle;

pub struct RemoteDocumentFacade {
    backend: BackendHandle,
}

impl RemoteDocumentFacade {
    pub fn new(backend: BackendHandle) -> RemoteDocumentFacade {
        return RemoteDocumentFacade { backend };
    }

    pub async fn health_check(&self) -> Result<()> {
        return self.backend.health_check().await;
    }

    pub async fn new_document(&self) -> Result<()> {
        tracing::debug!(operation = "new", "Backend request");
        return self.backend.new_file().await;
    }

    pub async fn open(&self) -> Result<bool> {
        let res = self.backend.open_file().await;
        tracing::debug!(operation = "open", success = ?res.as_ref().ok(), "Backend request");
        return res;
    }

    pub async fn open_path(&self, path: &Path) -> Result<bool> {
        let res = self.backend.open_path(path).await;
        tracing::debug!(operation = "open-path", path = ?path, success = ?res.as_ref().ok(), "Backend request");
        return res;
    }

    pub async fn save(&self) -> Result<bool> {
        let res = self.backend.save_file().await;
        tracing::debug!(operation = "save", success = ?res.as_ref().ok(), "Backend request");
        return res;
    }

    pub async fn save_as(&self) -> Result<bool> {
        let res = self.backend.save_file_as().await;
        tracing::debug!(operation = "save-as", success = ?res.as_ref().ok(), "Backend request");
        return res;
    }

    pub async fn get_content(&self) -> Result<String> {
        return self.backend.get_content().await;
    }

    pub async fn set_content(&self, text: &str) -> Result<()> {
        tracing::debug!(operation = "set-content", length = text.len(), "Backend request");
        return self.backend.set_content(text).await;
    }

    pub async fn toggle_theme(&self) -> Result<()> {
        tracing::debug!(operation = "toggle-theme", "Backend request");
        return self.backend.toggle_theme().await;
    }

    pub async fn toggle_autosave(&self) -> Result<bool> {
        let res = self.backend.toggle_autosave().await;
        tracing::debug!(operation = "toggle-autosave", enabled = ?res.as_ref().ok(), "Backend request");
        return res;
    }

    pub async fn shutdown(&self) -> Result<()> {
        return self.backend.shutdown().await;
    }
}
