use std::path::PathBuf;

use anyhow::Result;
use ratatui::backend::TestBackend;
use ratatui::text::Line;
use ratatui::Terminal;
use tokio::sync::oneshot;
use tui_textarea::Input;
use tui_textarea::Key;

use super::Prompt;
use super::Screen;
use crate::domain::models::Action;

fn key(key: Key) -> Input {
    return Input {
        key,
        ctrl: false,
        alt: false,
    };
}

fn line_text(line: Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
}

#[test]
fn it_reports_editor_changes() -> Result<()> {
    let mut screen = Screen::new(false, true);

    assert!(screen.editor_input(key(Key::Char('#'))));
    assert!(!screen.editor_input(key(Key::Right)));
    assert!(screen.editor_paste(" Title\r\nbody"));
    assert!(!screen.editor_paste(""));

    assert_eq!(screen.editor_value(), "# Title\nbody");

    return Ok(());
}

#[test]
fn it_replaces_editor_value() -> Result<()> {
    let mut screen = Screen::new(false, true);
    screen.set_editor_value("one\ntwo", 1);

    assert_eq!(screen.editor_value(), "one\ntwo");

    return Ok(());
}

#[test]
fn it_tags_changes_with_document_generation() -> Result<()> {
    let mut screen = Screen::new(false, true);
    screen.editor_input(key(Key::Char('a')));
    assert_eq!(
        screen.change_action(),
        Action::EditorChanged("a".to_string(), 0)
    );

    screen.set_editor_value("", 2);
    screen.editor_input(key(Key::Char('b')));
    assert_eq!(
        screen.change_action(),
        Action::EditorChanged("b".to_string(), 2)
    );

    return Ok(());
}

#[test]
fn it_answers_confirm_prompt() -> Result<()> {
    let mut screen = Screen::new(false, true);
    let (tx, mut rx) = oneshot::channel::<bool>();
    screen.prompt = Some(Prompt::Confirm("Continue?".to_string(), tx));

    assert!(screen.prompt_input(key(Key::Char('x'))));
    assert!(screen.prompt.is_some());
    assert!(rx.try_recv().is_err());

    assert!(screen.prompt_input(key(Key::Char('y'))));
    assert!(screen.prompt.is_none());
    assert!(rx.try_recv()?);

    assert!(!screen.prompt_input(key(Key::Char('y'))));

    return Ok(());
}

#[test]
fn it_declines_confirm_prompt_on_escape() -> Result<()> {
    let mut screen = Screen::new(false, true);
    let (tx, mut rx) = oneshot::channel::<bool>();
    screen.prompt = Some(Prompt::Confirm("Continue?".to_string(), tx));

    screen.prompt_input(key(Key::Esc));
    assert!(!rx.try_recv()?);

    return Ok(());
}

#[test]
fn it_edits_path_prompt() -> Result<()> {
    let mut screen = Screen::new(false, true);
    let (tx, mut rx) = oneshot::channel::<Option<PathBuf>>();
    screen.open_path_prompt("Save as".to_string(), "untitled.md".to_string(), tx);

    for _ in 0.."untitled.md".len() {
        screen.prompt_input(key(Key::Backspace));
    }
    assert!(screen.prompt_paste("notes/\ntoday.md"));
    screen.prompt_input(key(Key::Enter));

    assert_eq!(rx.try_recv()?, Some(PathBuf::from("notes/today.md")));
    assert!(screen.prompt.is_none());

    return Ok(());
}

#[test]
fn it_cancels_empty_path_prompt() -> Result<()> {
    let mut screen = Screen::new(false, true);
    let (tx, mut rx) = oneshot::channel::<Option<PathBuf>>();
    screen.open_path_prompt("Open file".to_string(), "".to_string(), tx);

    screen.prompt_input(key(Key::Enter));
    assert_eq!(rx.try_recv()?, None);

    return Ok(());
}

#[test]
fn it_labels_toolbar_from_state() -> Result<()> {
    let mut screen = Screen::new(false, true);
    assert_eq!(
        line_text(screen.toolbar()),
        " markpad - Untitled  [F2 New] [F3 Open] [F4 Save] [F5 Save As] [F6 Dark Mode] [F7 Autosave: On]"
    );

    screen.dark_mode = true;
    screen.autosave = "Autosave: Off".to_string();
    assert_eq!(
        line_text(screen.status_bar()),
        " Ready  |  0 words  |  Autosave: Off"
    );
    assert!(line_text(screen.toolbar()).contains("[F6 Light Mode]"));

    return Ok(());
}

#[test]
fn it_renders_all_panes() -> Result<()> {
    let mut screen = Screen::new(true, true);
    screen.set_editor_value("# Title", 1);
    screen.preview.set_markup("<h1>Title</h1>");

    let mut terminal = Terminal::new(TestBackend::new(120, 10))?;
    terminal.draw(|frame| {
        screen.render(frame);
    })?;

    let buffer = terminal.backend().buffer().clone();
    let content = buffer
        .content
        .iter()
        .map(|cell| return cell.symbol.to_string())
        .collect::<String>();

    assert!(content.contains("Editor"));
    assert!(content.contains("Preview"));
    assert!(content.contains("Title"));
    assert!(content.contains("Ready"));

    return Ok(());
}
