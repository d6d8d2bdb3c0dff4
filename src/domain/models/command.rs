use strum::EnumIter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    ToggleTheme,
    ToggleAutosave,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Button {
    New,
    Open,
    Save,
    SaveAs,
    ThemeToggle,
    AutosaveToggle,
}

impl Button {
    pub fn from_function_key(n: u8) -> Option<Button> {
        match n {
            2 => return Some(Button::New),
            3 => return Some(Button::Open),
            4 => return Some(Button::Save),
            5 => return Some(Button::SaveAs),
            6 => return Some(Button::ThemeToggle),
            7 => return Some(Button::AutosaveToggle),
            _ => return None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Button::New => return "F2 New",
            Button::Open => return "F3 Open",
            Button::Save => return "F4 Save",
            Button::SaveAs => return "F5 Save As",
            Button::ThemeToggle => return "F6 Theme",
            Button::AutosaveToggle => return "F7 Autosave",
        }
    }
}

/// A key press with its modifiers. `key` is always lowercase; shift is
/// tracked separately so `Ctrl+Shift+S` and `Ctrl+S` stay distinct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: char, ctrl: bool, meta: bool, shift: bool) -> KeyChord {
        let lower = key.to_ascii_lowercase();
        return KeyChord {
            key: lower,
            ctrl,
            meta,
            shift: shift || (key != lower),
        };
    }

    pub fn ctrl(key: char) -> KeyChord {
        return KeyChord::new(key, true, false, false);
    }

    pub fn ctrl_shift(key: char) -> KeyChord {
        return KeyChord::new(key, true, false, true);
    }

    pub fn meta(key: char) -> KeyChord {
        return KeyChord::new(key, false, true, false);
    }

    /// Ctrl on Linux and Windows, Cmd on macOS.
    pub fn has_command_modifier(&self) -> bool {
        return self.ctrl || self.meta;
    }
}
