#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum EditorTheme {
    #[strum(serialize = "vs")]
    Light,
    #[strum(serialize = "vs-dark")]
    Dark,
}

impl EditorTheme {
    pub fn from_dark_mode(dark_mode: bool) -> EditorTheme {
        if dark_mode {
            return EditorTheme::Dark;
        }

        return EditorTheme::Light;
    }

    pub fn is_dark(&self) -> bool {
        return *self == EditorTheme::Dark;
    }
}

pub trait EditorWidget {
    /// Replaces the widget's text. Does not produce a change notification;
    /// later changes are tagged with `generation`.
    fn set_value(&self, text: &str, generation: u64) -> Result<()>;

    fn set_theme(&self, theme: EditorTheme) -> Result<()>;

    fn focus(&self) -> Result<()>;
}

pub type EditorHandle = Arc<dyn EditorWidget + Send + Sync>;
