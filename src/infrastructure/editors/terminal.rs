#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::EditorTheme;
use crate::domain::models::EditorWidget;
use crate::domain::models::Event;
use crate::infrastructure::send_ui;

pub struct TerminalEditor {
    tx: mpsc::UnboundedSender<Event>,
}

impl TerminalEditor {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> TerminalEditor {
        return TerminalEditor { tx };
    }
}

impl EditorWidget for TerminalEditor {
    fn set_value(&self, text: &str, generation: u64) -> Result<()> {
        return send_ui(&self.tx, Event::EditorSetValue(text.to_string(), generation));
    }

    fn set_theme(&self, theme: EditorTheme) -> Result<()> {
        return send_ui(&self.tx, Event::EditorSetTheme(theme));
    }

    fn focus(&self) -> Result<()> {
        return send_ui(&self.tx, Event::EditorFocus());
    }
}
