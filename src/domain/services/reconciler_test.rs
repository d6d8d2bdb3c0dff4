use std::sync::Arc;

use anyhow::Result;

use super::UiState;
use crate::domain::models::EditorTheme;
use crate::domain::services::mocks::EditorCall;
use crate::domain::services::mocks::MockEditor;
use crate::domain::services::mocks::MockView;
use crate::domain::services::mocks::ViewCall;

fn state(dark_mode: bool) -> (Arc<MockView>, Arc<MockEditor>, UiState) {
    let view = Arc::new(MockView::default());
    let editor = Arc::new(MockEditor::default());
    let state = UiState::new(view.clone(), editor.clone(), dark_mode, true);
    return (view, editor, state);
}

#[test]
fn it_renders_initial_state() -> Result<()> {
    let (view, editor, state) = state(false);
    state.render()?;

    assert_eq!(
        view.calls(),
        vec![
            ViewCall::DarkTheme(false),
            ViewCall::Autosave("Autosave: On".to_string()),
            ViewCall::WordCount("0 words".to_string()),
        ]
    );
    assert_eq!(editor.theme(), Some(EditorTheme::Light));

    return Ok(());
}

#[test]
fn it_records_edits() -> Result<()> {
    let (view, _editor, mut state) = state(false);
    assert!(state.record_edit("Hello world".to_string(), 0)?);

    assert!(state.session.dirty);
    assert!(state.needs_discard_confirmation());
    assert_eq!(view.last_word_count(), Some("2 words".to_string()));

    state.record_edit("Hello".to_string(), 0)?;
    assert_eq!(view.last_word_count(), Some("1 word".to_string()));

    return Ok(());
}

#[test]
fn it_replaces_document_clean() -> Result<()> {
    let (view, editor, mut state) = state(false);
    state.record_edit("draft".to_string(), 0)?;
    state.replace_document("one two three")?;

    assert!(!state.session.dirty);
    assert_eq!(state.session.content, "one two three");
    assert_eq!(editor.value(), "one two three");
    assert_eq!(
        editor.calls().last(),
        Some(&EditorCall::SetValue("one two three".to_string(), 1))
    );
    assert_eq!(view.last_word_count(), Some("3 words".to_string()));

    return Ok(());
}

#[test]
fn it_drops_changes_to_a_replaced_document() -> Result<()> {
    let (_view, _editor, mut state) = state(false);
    state.replace_document("loaded")?;

    assert!(!state.record_edit("loaded!".to_string(), 0)?);
    assert!(!state.session.dirty);
    assert_eq!(state.session.content, "loaded");

    assert!(state.record_edit("loaded!".to_string(), 1)?);
    assert!(state.session.dirty);

    return Ok(());
}

#[test]
fn it_marks_saved() -> Result<()> {
    let (_view, _editor, mut state) = state(false);
    state.record_edit("draft".to_string(), 0)?;
    state.mark_saved();

    assert!(!state.needs_discard_confirmation());
    assert_eq!(state.session.content, "draft");

    return Ok(());
}

#[test]
fn it_toggles_theme_on_both_mirrors() -> Result<()> {
    let (view, editor, mut state) = state(false);

    let theme = state.toggle_theme()?;
    assert!(theme.dark_mode);
    assert_eq!(view.dark_theme(), Some(true));
    assert_eq!(editor.theme(), Some(EditorTheme::Dark));

    state.toggle_theme()?;
    assert_eq!(view.dark_theme(), Some(false));
    assert_eq!(editor.theme(), Some(EditorTheme::Light));

    return Ok(());
}

#[test]
fn it_applies_external_theme_idempotently() -> Result<()> {
    let (view, editor, mut state) = state(false);

    state.apply_external_theme(true)?;
    state.apply_external_theme(true)?;

    assert!(state.theme.dark_mode);
    assert_eq!(view.dark_theme(), Some(true));
    assert_eq!(editor.theme(), Some(EditorTheme::Dark));

    return Ok(());
}

#[test]
fn it_sets_autosave_label() -> Result<()> {
    let (view, editor, mut state) = state(false);
    state.set_autosave(false)?;
    state.focus_editor()?;

    assert_eq!(
        view.calls(),
        vec![ViewCall::Autosave("Autosave: Off".to_string())]
    );
    assert_eq!(editor.calls(), vec![EditorCall::Focus]);

    return Ok(());
}
