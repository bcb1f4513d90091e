//! Single-field text form.
//!
//! Owns an editable buffer and a character-indexed cursor. The form reports
//! completion through [`FormOutcome`]; what to do with the value is up to the
//! owning screen.

use crate::KeyInput;

/// Message shown when a required field is submitted empty.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Result of a key press that ends the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Form was submitted. Required fields carry the trimmed value, others
    /// the text exactly as typed.
    Submitted(String),
    /// Form was abandoned with `Esc`.
    Aborted,
}

/// Single text field with line editing.
///
/// `Enter` submits. In a multi-line field `Ctrl('j')` inserts a newline.
/// `Esc` aborts only when the form is cancellable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextForm {
    title: String,
    required: bool,
    multiline: bool,
    cancellable: bool,
    buffer: String,
    /// Cursor position in characters, not bytes.
    cursor: usize,
    /// Validation message from the last rejected submit.
    error: Option<String>,
}

impl TextForm {
    /// Create an empty single-line form.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            required: false,
            multiline: false,
            cancellable: false,
            buffer: String::new(),
            cursor: 0,
            error: None,
        }
    }

    /// Reject empty submissions.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow newlines in the value.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Let `Esc` abort the form.
    #[must_use]
    pub fn cancellable(mut self) -> Self {
        self.cancellable = true;
        self
    }

    /// Field title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current text, untrimmed.
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Validation message. `None` unless the last submit was rejected.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply a key press.
    ///
    /// Returns `Some` when the key ends the form, `None` while editing.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<FormOutcome> {
        match key {
            KeyInput::Char(c) => self.insert(c),
            KeyInput::Ctrl('j') if self.multiline => self.insert('\n'),
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.char_count(),
            KeyInput::Enter => return self.submit(),
            KeyInput::Esc if self.cancellable => return Some(FormOutcome::Aborted),
            KeyInput::Ctrl(_)
            | KeyInput::Esc
            | KeyInput::Tab
            | KeyInput::Up
            | KeyInput::Down => {},
        }
        None
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
        self.error = None;
    }

    fn submit(&mut self) -> Option<FormOutcome> {
        if !self.required {
            self.error = None;
            return Some(FormOutcome::Submitted(self.buffer.clone()));
        }

        let value = self.buffer.trim();
        if value.is_empty() {
            self.error = Some(REQUIRED_MESSAGE.to_string());
            return None;
        }

        self.error = None;
        Some(FormOutcome::Submitted(value.to_string()))
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
