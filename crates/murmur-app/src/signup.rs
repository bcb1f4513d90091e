//! Signup screen.
//!
//! Collects a display name for an unregistered key and issues the
//! registration. The parent session swaps this screen for the feed when
//! [`AppEvent::RegistrationCompleted`] arrives.

use crate::{AppAction, AppEvent, FormOutcome, KeyInput, TextForm};

/// Title of the name field.
pub const NAME_TITLE: &str = "Name";

/// Signup progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupState {
    /// Name form is accepting input.
    Editing,
    /// Registration issued; waiting for the store.
    Registering {
        /// Name that was submitted.
        name: String,
    },
    /// Registration failed; the error replaces the form.
    Failed {
        /// Error description.
        message: String,
    },
}

/// Screen shown to a key with no user record.
#[derive(Debug, Clone)]
pub struct SignupScreen {
    public_key: Vec<u8>,
    form: TextForm,
    state: SignupState,
}

impl SignupScreen {
    /// Create a signup screen bound to the connecting key.
    pub fn new(public_key: Vec<u8>) -> Self {
        Self { public_key, form: TextForm::new(NAME_TITLE).required(), state: SignupState::Editing }
    }

    /// Actions to run when the screen becomes active.
    pub fn init(&self) -> Vec<AppAction> {
        Vec::new()
    }

    /// Process an event routed from the session.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::RegistrationFailed { message } => {
                if matches!(self.state, SignupState::Registering { .. }) {
                    self.state = SignupState::Failed { message };
                    vec![AppAction::Render]
                } else {
                    tracing::debug!("ignoring registration failure outside registration");
                    Vec::new()
                }
            },
            AppEvent::Resize(..) => Vec::new(),
            other => {
                tracing::debug!(event = ?other, "signup ignoring event");
                Vec::new()
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        // Once submitted the form never reopens; reconnect to retry
        if self.state != SignupState::Editing {
            return Vec::new();
        }

        match self.form.handle_key(key) {
            Some(FormOutcome::Submitted(name)) => {
                self.state = SignupState::Registering { name: name.clone() };
                vec![AppAction::Register { key: self.public_key.clone(), name }, AppAction::Render]
            },
            Some(FormOutcome::Aborted) | None => vec![AppAction::Render],
        }
    }

    /// Name form.
    pub fn form(&self) -> &TextForm {
        &self.form
    }

    /// Current progress.
    pub fn state(&self) -> &SignupState {
        &self.state
    }

    /// Registration error. `None` unless registration failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SignupState::Failed { message } => Some(message),
            SignupState::Editing | SignupState::Registering { .. } => None,
        }
    }
}
