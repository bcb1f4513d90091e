//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use murmur_app::{AppEvent, Driver, KeyInput, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Puts the terminal in raw mode on the alternate screen for its lifetime and
/// restores it on [`Driver::stop`] or drop, whichever comes first.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new(), restored: false })
    }

    /// Current window size (columns, rows).
    pub fn size() -> Result<(u16, u16), TerminalError> {
        Ok(terminal::size()?)
    }

    /// Convert a crossterm key event to `KeyInput`.
    pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char(c) = event.code
        {
            return Some(KeyInput::Ctrl(c.to_ascii_lowercase()));
        }

        match event.code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        // Stream `next` is cancel-safe
        while let Some(event) = self.event_stream.next().await {
            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = Self::convert_key(key) {
                        return Ok(Some(AppEvent::Key(input)));
                    }
                },
                Event::Resize(columns, rows) => return Ok(Some(AppEvent::Resize(columns, rows))),
                _ => {},
            }
        }
        Ok(None)
    }

    fn render(&mut self, session: &Session) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, session))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_keys_convert() {
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(KeyInput::Char('a'))
        );
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('A'))
        );
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyInput::Enter)
        );
    }

    #[test]
    fn control_chords_convert() {
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::INTERRUPT)
        );
        assert_eq!(
            TerminalDriver::convert_key(key(KeyCode::Char('J'), KeyModifiers::CONTROL)),
            Some(KeyInput::Ctrl('j'))
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
