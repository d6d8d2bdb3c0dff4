#[cfg(test)]
#[path = "reconciler_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::AutosaveState;
use crate::domain::models::EditorHandle;
use crate::domain::models::EditorSession;
use crate::domain::models::EditorTheme;
use crate::domain::models::ThemeState;
use crate::domain::models::ViewHandle;

pub struct UiState {
    pub session: EditorSession,
    // Bumped every time the widget's text is replaced. Changes typed into an
    // older document carry an older value and are dropped.
    pub generation: u64,
    pub theme: ThemeState,
    pub autosave: AutosaveState,
    view: ViewHandle,
    editor: EditorHandle,
}

impl UiState {
    pub fn new(
        view: ViewHandle,
        editor: EditorHandle,
        dark_mode: bool,
        autosave_enabled: bool,
    ) -> UiState {
        return UiState {
            session: EditorSession::default(),
            generation: 0,
            theme: ThemeState::new(dark_mode),
            autosave: AutosaveState::new(autosave_enabled),
            view,
            editor,
        };
    }

    pub fn view(&self) -> &ViewHandle {
        return &self.view;
    }

    pub fn render(&self) -> Result<()> {
        self.apply_theme()?;
        self.view.set_autosave(&self.autosave.label())?;
        self.view.set_word_count(&self.session.word_count_label())?;
        return Ok(());
    }

    /// Applies a change from the widget. Returns `false` when the change was
    /// made to a document that has since been replaced.
    pub fn record_edit(&mut self, content: String, generation: u64) -> Result<bool> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping change to a replaced document"
            );
            return Ok(false);
        }

        self.session.record_edit(content);
        self.view.set_word_count(&self.session.word_count_label())?;
        return Ok(true);
    }

    pub fn replace_document(&mut self, content: &str) -> Result<()> {
        self.generation += 1;
        self.editor.set_value(content, self.generation)?;
        self.session = EditorSession::new(content);
        return self.view.set_word_count(&self.session.word_count_label());
    }

    pub fn mark_saved(&mut self) {
        self.session.dirty = false;
    }

    pub fn needs_discard_confirmation(&self) -> bool {
        return self.session.dirty;
    }

    /// Local toggle. The caller is responsible for telling the backend.
    pub fn toggle_theme(&mut self) -> Result<ThemeState> {
        self.theme = self.theme.toggled();
        self.apply_theme()?;
        return Ok(self.theme);
    }

    pub fn apply_external_theme(&mut self, dark_mode: bool) -> Result<()> {
        self.theme = ThemeState::new(dark_mode);
        return self.apply_theme();
    }

    pub fn set_autosave(&mut self, enabled: bool) -> Result<()> {
        self.autosave = AutosaveState::new(enabled);
        return self.view.set_autosave(&self.autosave.label());
    }

    pub fn focus_editor(&self) -> Result<()> {
        return self.editor.focus();
    }

    fn apply_theme(&self) -> Result<()> {
        self.view.set_dark_theme(self.theme.dark_mode)?;
        self.editor
            .set_theme(EditorTheme::from_dark_mode(self.theme.dark_mode))?;
        return Ok(());
    }
}
