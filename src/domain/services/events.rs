#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Button;
use crate::domain::models::Event;
use crate::domain::models::KeyChord;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_key(keyevent: KeyEvent) -> Option<Event> {
        if keyevent.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = keyevent.modifiers.contains(KeyModifiers::CONTROL);
        let meta = keyevent.modifiers.contains(KeyModifiers::SUPER);
        let shift = keyevent.modifiers.contains(KeyModifiers::SHIFT);

        match keyevent.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                return Some(Event::KeyboardCTRLC());
            }
            KeyCode::Char(c) if ctrl || meta => {
                return Some(Event::KeyboardChord(
                    KeyChord::new(c, ctrl, meta, shift),
                    keyevent.into(),
                ));
            }
            KeyCode::F(n) => {
                return Button::from_function_key(n).map(|button| {
                    return Event::KeyboardButton(button);
                });
            }
            KeyCode::Up if ctrl => {
                return Some(Event::UIScrollUp());
            }
            KeyCode::Down if ctrl => {
                return Some(Event::UIScrollDown());
            }
            KeyCode::PageUp if ctrl => {
                return Some(Event::UIScrollPageUp());
            }
            KeyCode::PageDown if ctrl => {
                return Some(Event::UIScrollPageDown());
            }
            _ => {
                return Some(Event::KeyboardCharInput(keyevent.into()));
            }
        }
    }

    fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                return EventsService::handle_key(keyevent);
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                // A closed channel means the session is gone, so the UI quits.
                event = self.events.recv() => Some(event.unwrap_or(Event::KeyboardCTRLC())),
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => EventsService::handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
