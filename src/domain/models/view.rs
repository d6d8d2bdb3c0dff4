use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait View {
    fn set_preview(&self, html: &str) -> Result<()>;

    fn set_status(&self, text: &str) -> Result<()>;

    fn set_word_count(&self, label: &str) -> Result<()>;

    fn set_dark_theme(&self, dark_mode: bool) -> Result<()>;

    fn set_autosave(&self, label: &str) -> Result<()>;

    fn set_title(&self, title: &str) -> Result<()>;

    async fn confirm(&self, message: &str) -> Result<bool>;
}

pub type ViewHandle = Arc<dyn View + Send + Sync>;
