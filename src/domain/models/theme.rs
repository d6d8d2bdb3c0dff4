#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub dark_mode: bool,
}

impl ThemeState {
    pub fn new(dark_mode: bool) -> ThemeState {
        return ThemeState { dark_mode };
    }

    pub fn toggled(&self) -> ThemeState {
        return ThemeState {
            dark_mode: !self.dark_mode,
        };
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.dark_mode {
            return "Light Mode";
        }

        return "Dark Mode";
    }
}

/// Cached copy of the backend's autosave setting. Only ever updated from the
/// backend's answer, never predicted locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosaveState {
    pub enabled: bool,
}

impl AutosaveState {
    pub fn new(enabled: bool) -> AutosaveState {
        return AutosaveState { enabled };
    }

    pub fn label(&self) -> String {
        if self.enabled {
            return "Autosave: On".to_string();
        }

        return "Autosave: Off".to_string();
    }
}
