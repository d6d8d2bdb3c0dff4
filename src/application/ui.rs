#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::SetTitle;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::AutosaveState;
use crate::domain::models::Button;
use crate::domain::models::EditorTheme;
use crate::domain::models::Event;
use crate::domain::models::ThemeState;
use crate::domain::models::STATUS_READY;
use crate::domain::services::events::EventsService;
use crate::domain::services::CommandRouter;
use crate::domain::services::Preview;
use crate::infrastructure::backends::local::window_title;

enum Prompt<'a> {
    Confirm(String, oneshot::Sender<bool>),
    Path(String, TextArea<'a>, oneshot::Sender<Option<PathBuf>>),
}

fn palette(dark_mode: bool) -> Style {
    if dark_mode {
        return Style::default().fg(Color::Gray).bg(Color::Black);
    }

    return Style::default().fg(Color::Black).bg(Color::White);
}

fn pane(title: &str, style: Style) -> Block<'_> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .padding(Padding::new(1, 1, 0, 0))
        .style(style);
}

struct Screen<'a> {
    textarea: TextArea<'a>,
    generation: u64,
    editor_theme: EditorTheme,
    editor_focused: bool,
    preview: Preview,
    status: String,
    word_count: String,
    autosave: String,
    title: String,
    dark_mode: bool,
    prompt: Option<Prompt<'a>>,
}

impl<'a> Screen<'a> {
    fn new(dark_mode: bool, autosave_enabled: bool) -> Screen<'a> {
        let mut screen = Screen {
            textarea: TextArea::default(),
            generation: 0,
            editor_theme: EditorTheme::from_dark_mode(dark_mode),
            editor_focused: false,
            preview: Preview::default(),
            status: STATUS_READY.to_string(),
            word_count: "0 words".to_string(),
            autosave: AutosaveState::new(autosave_enabled).label(),
            title: window_title(None),
            dark_mode,
            prompt: None,
        };
        screen.style_editor();

        return screen;
    }

    fn style_editor(&mut self) {
        let style = palette(self.editor_theme.is_dark());
        self.textarea.set_style(style);
        self.textarea.set_block(pane("Editor", style));

        let mut cursor_style = style;
        if self.editor_focused {
            cursor_style = cursor_style.add_modifier(Modifier::REVERSED);
        }
        self.textarea.set_cursor_style(cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
    }

    fn set_editor_value(&mut self, text: &str, generation: u64) {
        self.textarea = TextArea::new(text.split('\n').map(|line| return line.to_string()).collect());
        self.generation = generation;
        self.style_editor();
    }

    fn editor_value(&self) -> String {
        return self.textarea.lines().join("\n");
    }

    fn change_action(&self) -> Action {
        return Action::EditorChanged(self.editor_value(), self.generation);
    }

    fn editor_input(&mut self, input: Input) -> bool {
        return self.textarea.input(input);
    }

    fn editor_paste(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            match c {
                '\r' => continue,
                '\n' => self.textarea.insert_newline(),
                _ => self.textarea.insert_char(c),
            }
            changed = true;
        }

        return changed;
    }

    fn open_path_prompt(
        &mut self,
        message: String,
        default_value: String,
        reply: oneshot::Sender<Option<PathBuf>>,
    ) {
        let mut input = TextArea::new(vec![default_value]);
        input.move_cursor(tui_textarea::CursorMove::End);
        input.set_cursor_line_style(Style::default());
        self.prompt = Some(Prompt::Path(message, input, reply));
    }

    /// Returns `false` when no prompt is showing.
    fn prompt_input(&mut self, input: Input) -> bool {
        let prompt = match self.prompt.take() {
            Some(prompt) => prompt,
            None => return false,
        };

        match prompt {
            Prompt::Confirm(message, reply) => match input.key {
                Key::Char('y') | Key::Char('Y') | Key::Enter => {
                    let _ = reply.send(true);
                }
                Key::Char('n') | Key::Char('N') | Key::Esc => {
                    let _ = reply.send(false);
                }
                _ => {
                    self.prompt = Some(Prompt::Confirm(message, reply));
                }
            },
            Prompt::Path(message, mut path_input, reply) => match input.key {
                Key::Enter => {
                    let value = path_input.lines().join("").trim().to_string();
                    let path = if value.is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(value))
                    };
                    let _ = reply.send(path);
                }
                Key::Esc => {
                    let _ = reply.send(None);
                }
                _ => {
                    path_input.input(input);
                    self.prompt = Some(Prompt::Path(message, path_input, reply));
                }
            },
        }

        return true;
    }

    fn prompt_paste(&mut self, text: &str) -> bool {
        if let Some(Prompt::Path(_, path_input, _)) = self.prompt.as_mut() {
            for c in text.chars().filter(|c| return *c != '\n' && *c != '\r') {
                path_input.insert_char(c);
            }
            return true;
        }

        return self.prompt.is_some();
    }

    fn toolbar(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.title),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        for button in Button::iter() {
            let label = match button {
                Button::ThemeToggle => {
                    format!("F6 {}", ThemeState::new(self.dark_mode).toggle_label())
                }
                Button::AutosaveToggle => format!("F7 {}", self.autosave),
                _ => button.label().to_string(),
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        return Line::from(spans);
    }

    fn status_bar(&self) -> Line<'static> {
        if let Some(Prompt::Confirm(message, _)) = self.prompt.as_ref() {
            return Line::from(Span::styled(
                format!(" {message} (y/n)"),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }

        return Line::from(vec![
            Span::raw(format!(" {}", self.status)),
            Span::raw("  |  "),
            Span::raw(self.word_count.to_string()),
            Span::raw("  |  "),
            Span::raw(self.autosave.to_string()),
        ]);
    }

    fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let style = palette(self.dark_mode);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.size());

        frame.render_widget(Paragraph::new(self.toolbar()).style(style), layout[0]);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);

        frame.render_widget(self.textarea.widget(), panes[0]);
        frame.render_widget(
            Paragraph::new(self.preview.lines())
                .block(pane("Preview", style))
                .style(style)
                .wrap(Wrap { trim: false })
                .scroll((self.preview.position, 0)),
            panes[1],
        );
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            panes[1].inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut self.preview.scrollbar_state,
        );

        if let Some(Prompt::Path(message, path_input, _)) = self.prompt.as_ref() {
            let label = format!(" {message}: ");
            let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            let row = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(label_width), Constraint::Min(1)])
                .split(layout[2]);

            frame.render_widget(
                Paragraph::new(label).style(style.add_modifier(Modifier::BOLD)),
                row[0],
            );
            frame.render_widget(path_input.widget(), row[1]);
        } else {
            frame.render_widget(Paragraph::new(self.status_bar()).style(style), layout[2]);
        }
    }
}

fn send_change(tx: &mpsc::UnboundedSender<Action>, screen: &Screen) -> Result<()> {
    tx.send(screen.change_action())?;
    return Ok(());
}

async fn start_loop<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    screen: &mut Screen<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    #[cfg(feature = "dev")]
    {
        let test_str = "# markpad\n\nSome **bold** text.\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```";
        screen.editor_paste(test_str);
        send_change(&tx, screen)?;
    }

    loop {
        terminal.draw(|frame| {
            screen.render(frame);
        })?;

        match events.next().await? {
            Event::EditorFocus() => {
                screen.editor_focused = true;
                screen.style_editor();
            }
            Event::EditorSetTheme(theme) => {
                screen.editor_theme = theme;
                screen.style_editor();
            }
            Event::EditorSetValue(text, generation) => {
                screen.set_editor_value(&text, generation);
            }
            Event::KeyboardButton(button) => {
                if screen.prompt.is_none() {
                    tx.send(Action::Command(CommandRouter::route_button(button)))?;
                }
            }
            Event::KeyboardChord(chord, input) => {
                if screen.prompt_input(input.clone()) {
                    continue;
                }

                if let Some(command) = CommandRouter::route_key(&chord) {
                    tx.send(Action::Command(command))?;
                } else if screen.editor_input(input) {
                    send_change(&tx, screen)?;
                }
            }
            Event::KeyboardCharInput(input) => {
                if screen.prompt_input(input.clone()) {
                    continue;
                }

                if screen.editor_input(input) {
                    send_change(&tx, screen)?;
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardPaste(text) => {
                if screen.prompt_paste(&text) {
                    continue;
                }

                if screen.editor_paste(&text) {
                    send_change(&tx, screen)?;
                }
            }
            Event::PromptConfirm(message, reply) => {
                screen.prompt = Some(Prompt::Confirm(message, reply));
            }
            Event::PromptPath(message, default_value, reply) => {
                screen.open_path_prompt(message, default_value, reply);
            }
            Event::UIScrollDown() => {
                screen.preview.down();
            }
            Event::UIScrollPageDown() => {
                screen.preview.down_page();
            }
            Event::UIScrollPageUp() => {
                screen.preview.up_page();
            }
            Event::UIScrollUp() => {
                screen.preview.up();
            }
            Event::UITick() => (),
            Event::ViewAutosave(label) => {
                screen.autosave = label;
            }
            Event::ViewDarkTheme(dark_mode) => {
                screen.dark_mode = dark_mode;
            }
            Event::ViewPreview(html) => {
                screen.preview.set_markup(&html);
            }
            Event::ViewStatus(text) => {
                screen.status = text;
            }
            Event::ViewTitle(title) => {
                crossterm::execute!(terminal.backend_mut(), SetTitle(&title))?;
                screen.title = title;
            }
            Event::ViewWordCount(label) => {
                screen.word_count = label;
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    dark_mode: bool,
    autosave_enabled: bool,
) -> Result<()> {
    let stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        &stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut screen = Screen::new(dark_mode, autosave_enabled);
    crossterm::execute!(terminal.backend_mut(), SetTitle(&screen.title))?;

    let res = start_loop(&mut terminal, &mut screen, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
