use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press after translation into game terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Delete,
    Submit,
}

impl KeyInput {
    /// Translates a browser-style key name (`"Enter"`, `"Backspace"`, `"a"`).
    ///
    /// Returns `None` for anything that is not a single letter or one of the two editing
    /// keys, and for any key held together with control.
    pub fn from_key_name(key: &str, ctrl: bool) -> Option<Self> {
        if ctrl {
            return None;
        }
        match key {
            "Enter" => Some(Self::Submit),
            "Backspace" => Some(Self::Delete),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Some(Self::Letter(c.to_ascii_lowercase()))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Translates a terminal key event. Releases and control/alt chords are ignored.
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release
            || key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Backspace => Some(Self::Delete),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(Self::Letter(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}
