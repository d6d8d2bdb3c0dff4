use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::time;

use crate::domain::models::DocumentBackend;
use crate::domain::models::EditorTheme;
use crate::domain::models::EditorWidget;
use crate::domain::models::Highlighter;
use crate::domain::models::View;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    NewFile,
    OpenFile,
    OpenPath(PathBuf),
    SaveFile,
    SaveFileAs,
    GetContent,
    SetContent(String),
    ToggleTheme,
    ToggleAutosave,
    Shutdown,
}

pub struct MockBackend {
    pub(crate) calls: Mutex<Vec<BackendCall>>,
    pub open_result: bool,
    pub save_result: bool,
    pub content: String,
    pub unreachable: bool,
    // Delays the first `set_content`. Pushes are recorded when they land.
    pub slow_first_push: Option<Duration>,
    pub(crate) pushed_once: AtomicBool,
    pub(crate) autosave: AtomicBool,
}

impl Default for MockBackend {
    fn default() -> MockBackend {
        return MockBackend {
            calls: Mutex::new(vec![]),
            open_result: true,
            save_result: true,
            content: "".to_string(),
            unreachable: false,
            slow_first_push: None,
            pushed_once: AtomicBool::new(false),
            autosave: AtomicBool::new(true),
        };
    }
}

impl MockBackend {
    pub fn calls(&self) -> Vec<BackendCall> {
        return self.calls.lock().unwrap().clone();
    }

    pub fn count(&self, call: &BackendCall) -> usize {
        return self.calls().iter().filter(|c| return *c == call).count();
    }

    pub fn pushes(&self) -> Vec<String> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| {
                if let BackendCall::SetContent(text) = c {
                    return Some(text);
                }
                return None;
            })
            .collect();
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.unreachable {
            bail!("backend unreachable");
        }
        return Ok(());
    }
}

#[async_trait]
impl DocumentBackend for MockBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.unreachable {
            bail!("backend unreachable");
        }
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn new_file(&self) -> Result<()> {
        return self.record(BackendCall::NewFile);
    }

    #[allow(clippy::implicit_return)]
    async fn open_file(&self) -> Result<bool> {
        self.record(BackendCall::OpenFile)?;
        return Ok(self.open_result);
    }

    #[allow(clippy::implicit_return)]
    async fn open_path(&self, path: &Path) -> Result<bool> {
        self.record(BackendCall::OpenPath(path.to_path_buf()))?;
        return Ok(self.open_result);
    }

    #[allow(clippy::implicit_return)]
    async fn save_file(&self) -> Result<bool> {
        self.record(BackendCall::SaveFile)?;
        return Ok(self.save_result);
    }

    #[allow(clippy::implicit_return)]
    async fn save_file_as(&self) -> Result<bool> {
        self.record(BackendCall::SaveFileAs)?;
        return Ok(self.save_result);
    }

    #[allow(clippy::implicit_return)]
    async fn get_content(&self) -> Result<String> {
        self.record(BackendCall::GetContent)?;
        return Ok(self.content.to_string());
    }

    #[allow(clippy::implicit_return)]
    async fn set_content(&self, content: &str) -> Result<()> {
        if let Some(delay) = self.slow_first_push {
            if !self.pushed_once.swap(true, Ordering::SeqCst) {
                time::sleep(delay).await;
            }
        }
        return self.record(BackendCall::SetContent(content.to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn toggle_theme(&self) -> Result<()> {
        return self.record(BackendCall::ToggleTheme);
    }

    #[allow(clippy::implicit_return)]
    async fn toggle_autosave(&self) -> Result<bool> {
        self.record(BackendCall::ToggleAutosave)?;
        let enabled = !self.autosave.load(Ordering::SeqCst);
        self.autosave.store(enabled, Ordering::SeqCst);
        return Ok(enabled);
    }

    #[allow(clippy::implicit_return)]
    async fn shutdown(&self) -> Result<()> {
        return self.record(BackendCall::Shutdown);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewCall {
    Preview(String),
    Status(String),
    WordCount(String),
    DarkTheme(bool),
    Autosave(String),
    Title(String),
    Confirm(String),
}

#[derive(Default)]
pub struct MockView {
    calls: Mutex<Vec<ViewCall>>,
    pub confirm_answer: bool,
}

impl MockView {
    pub fn answering(confirm_answer: bool) -> MockView {
        return MockView {
            calls: Mutex::new(vec![]),
            confirm_answer,
        };
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        return self.calls.lock().unwrap().clone();
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn statuses(&self) -> Vec<String> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| {
                if let ViewCall::Status(text) = c {
                    return Some(text);
                }
                return None;
            })
            .collect();
    }

    pub fn last_status(&self) -> Option<String> {
        return self.statuses().pop();
    }

    pub fn last_word_count(&self) -> Option<String> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| {
                if let ViewCall::WordCount(label) = c {
                    return Some(label);
                }
                return None;
            })
            .last();
    }

    pub fn dark_theme(&self) -> Option<bool> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| {
                if let ViewCall::DarkTheme(dark_mode) = c {
                    return Some(dark_mode);
                }
                return None;
            })
            .last();
    }

    pub fn confirmations(&self) -> usize {
        return self
            .calls()
            .iter()
            .filter(|c| return matches!(c, ViewCall::Confirm(_)))
            .count();
    }

    fn record(&self, call: ViewCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        return Ok(());
    }
}

#[async_trait]
impl View for MockView {
    fn set_preview(&self, html: &str) -> Result<()> {
        return self.record(ViewCall::Preview(html.to_string()));
    }

    fn set_status(&self, text: &str) -> Result<()> {
        return self.record(ViewCall::Status(text.to_string()));
    }

    fn set_word_count(&self, label: &str) -> Result<()> {
        return self.record(ViewCall::WordCount(label.to_string()));
    }

    fn set_dark_theme(&self, dark_mode: bool) -> Result<()> {
        return self.record(ViewCall::DarkTheme(dark_mode));
    }

    fn set_autosave(&self, label: &str) -> Result<()> {
        return self.record(ViewCall::Autosave(label.to_string()));
    }

    fn set_title(&self, title: &str) -> Result<()> {
        return self.record(ViewCall::Title(title.to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn confirm(&self, message: &str) -> Result<bool> {
        self.record(ViewCall::Confirm(message.to_string()))?;
        return Ok(self.confirm_answer);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorCall {
    SetValue(String, u64),
    SetTheme(EditorTheme),
    Focus,
}

#[derive(Default)]
pub struct MockEditor {
    calls: Mutex<Vec<EditorCall>>,
    value: Mutex<String>,
}

impl MockEditor {
    pub fn calls(&self) -> Vec<EditorCall> {
        return self.calls.lock().unwrap().clone();
    }

    pub fn value(&self) -> String {
        return self.value.lock().unwrap().to_string();
    }

    pub fn theme(&self) -> Option<EditorTheme> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| {
                if let EditorCall::SetTheme(theme) = c {
                    return Some(theme);
                }
                return None;
            })
            .last();
    }
}

impl EditorWidget for MockEditor {
    fn set_value(&self, text: &str, generation: u64) -> Result<()> {
        *self.value.lock().unwrap() = text.to_string();
        self.calls
            .lock()
            .unwrap()
            .push(EditorCall::SetValue(text.to_string(), generation));
        return Ok(());
    }

    fn set_theme(&self, theme: EditorTheme) -> Result<()> {
        self.calls.lock().unwrap().push(EditorCall::SetTheme(theme));
        return Ok(());
    }

    fn focus(&self) -> Result<()> {
        self.calls.lock().unwrap().push(EditorCall::Focus);
        return Ok(());
    }
}

#[derive(Default)]
pub struct TaggingHighlighter {}

impl Highlighter for TaggingHighlighter {
    fn highlight_code_blocks(&self, html: &str, dark_mode: bool) -> String {
        return format!("<highlighted dark={dark_mode}>{html}</highlighted>");
    }
}

pub fn handles(
    backend: MockBackend,
    view: MockView,
) -> (Arc<MockBackend>, Arc<MockView>, Arc<MockEditor>) {
    return (
        Arc::new(backend),
        Arc::new(view),
        Arc::new(MockEditor::default()),
    );
}
