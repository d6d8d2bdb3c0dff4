use std::path::PathBuf;

use tokio::sync::oneshot;
use tui_textarea::Input;

use super::Button;
use super::EditorTheme;
use super::KeyChord;

pub enum Event {
    EditorFocus(),
    EditorSetTheme(EditorTheme),
    EditorSetValue(String, u64),
    KeyboardButton(Button),
    KeyboardChord(KeyChord, Input),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardPaste(String),
    PromptConfirm(String, oneshot::Sender<bool>),
    PromptPath(String, String, oneshot::Sender<Option<PathBuf>>),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
    ViewAutosave(String),
    ViewDarkTheme(bool),
    ViewPreview(String),
    ViewStatus(String),
    ViewTitle(String),
    ViewWordCount(String),
}
