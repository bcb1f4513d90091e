//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples session logic from terminal libraries (crossterm, an SSH pty
/// reader, etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Character typed with Control held. `Ctrl('c')` is the interrupt.
    Ctrl(char),
    /// Enter/Return key (submit).
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key.
    Tab,
    /// Escape key (cancel compose).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

impl KeyInput {
    /// The interrupt key.
    pub const INTERRUPT: Self = Self::Ctrl('c');

    /// `true` for the keys that end a session from any screen.
    pub fn is_quit(self) -> bool {
        matches!(self, Self::Char('q')) || self == Self::INTERRUPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert!(KeyInput::Char('q').is_quit());
        assert!(KeyInput::Ctrl('c').is_quit());
        assert!(!KeyInput::Char('Q').is_quit());
        assert!(!KeyInput::Ctrl('q').is_quit());
        assert!(!KeyInput::Esc.is_quit());
    }
}
