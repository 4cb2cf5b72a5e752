pub mod terminal;

pub use terminal::Terminal;

use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Other,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for KeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn has_alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }
}

/// Input read from the terminal, already mapped off crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    /// New size in cells.
    Resize { width: u16, height: u16 },
}

#[cfg(test)]
mod tests {
    use super::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent};

    #[test]
    fn alt_is_detected_alongside_other_modifiers() {
        assert!(KeyEvent::alt(KeyCode::Down).has_alt());
        assert!(!KeyEvent::plain(KeyCode::Down).has_alt());

        let chord = KeyEvent::new(KeyCode::PageUp, KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert!(chord.has_alt());
        assert!(!KeyEvent::new(KeyCode::PageUp, KeyModifiers::CONTROL).has_alt());
    }

    #[test]
    fn key_events_compare_by_code_and_modifiers() {
        let event = TerminalEvent::Key(KeyEvent::alt(KeyCode::Down));
        assert_eq!(event, TerminalEvent::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::ALT)));
        assert_ne!(event, TerminalEvent::Key(KeyEvent::plain(KeyCode::Down)));
    }
}
