#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use crate::domain::models::Button;
use crate::domain::models::Command;
use crate::domain::models::KeyChord;

pub struct CommandRouter {}

impl CommandRouter {
    /// A bound chord is consumed and never reaches the editor widget.
    pub fn route_key(chord: &KeyChord) -> Option<Command> {
        if !chord.has_command_modifier() {
            return None;
        }

        match (chord.key, chord.shift) {
            ('s', true) => return Some(Command::SaveAs),
            ('s', false) => return Some(Command::Save),
            ('n', false) => return Some(Command::New),
            ('o', false) => return Some(Command::Open),
            _ => return None,
        }
    }

    pub fn route_button(button: Button) -> Command {
        match button {
            Button::New => return Command::New,
            Button::Open => return Command::Open,
            Button::Save => return Command::Save,
            Button::SaveAs => return Command::SaveAs,
            Button::ThemeToggle => return Command::ToggleTheme,
            Button::AutosaveToggle => return Command::ToggleAutosave,
        }
    }
}
