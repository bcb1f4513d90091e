//! Session state machine.
//!
//! This module defines [`Session`], the root state machine of one connection.
//! It is pure: it consumes [`AppEvent`] inputs and produces [`AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Resolves the connecting key on init and activates exactly one screen.
//! - Inspects every event first: resize, quit keys and completed
//!   registrations are handled here, everything else goes to the screen.
//! - Records window dimensions for the renderer.

use murmur_store::User;

use crate::{AppAction, AppEvent, FeedScreen, KeyInput, SignupScreen};

/// Banner shown while no screen is active.
pub const DEFAULT_BANNER: &str = "Nothing to murmur about yet...";

/// Window size used when the transport reports none.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Connection-level authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Identity lookup pending or failed.
    Initializing,
    /// Key has no user record; signup is active.
    Unauthenticated,
    /// User resolved; feed is active.
    Authenticated,
    /// Quit requested. Terminal.
    Closed,
}

/// The screen that currently owns input.
#[derive(Debug, Clone)]
pub enum Screen {
    /// No screen yet; the idle banner is shown.
    None,
    /// Name collection for a new key.
    Signup(SignupScreen),
    /// Post list and compose form.
    Feed(FeedScreen),
}

/// Parameters supplied by the transport when a connection opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    /// Window columns.
    pub width: u16,
    /// Window rows.
    pub height: u16,
    /// Connecting key, as presented by the transport.
    pub public_key: Vec<u8>,
    /// Idle banner text.
    pub banner: String,
}

impl SessionParams {
    /// Parameters with the default size and banner.
    pub fn new(public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            public_key: public_key.into(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }

    /// Override the window size.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the idle banner.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}

/// Root state machine for one connection.
///
/// No I/O dependencies: fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    screen: Screen,
    user: Option<User>,
    public_key: Vec<u8>,
    banner: String,
    /// Window dimensions (columns, rows).
    size: (u16, u16),
}

impl Session {
    /// Create a session for a newly opened connection.
    pub fn new(params: SessionParams) -> Self {
        Self {
            state: SessionState::Initializing,
            screen: Screen::None,
            user: None,
            public_key: params.public_key,
            banner: params.banner,
            size: (params.width, params.height),
        }
    }

    /// Actions to run when the connection opens.
    pub fn init(&self) -> Vec<AppAction> {
        vec![AppAction::LookupUser { key: self.public_key.clone() }, AppAction::Render]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        if self.state == SessionState::Closed {
            tracing::debug!(event = ?event, "session closed, dropping event");
            return Vec::new();
        }

        match event {
            AppEvent::Key(key) if key.is_quit() => {
                self.state = SessionState::Closed;
                vec![AppAction::Quit]
            },
            AppEvent::Resize(width, height) => {
                self.size = (width, height);
                let mut actions = self.forward(AppEvent::Resize(width, height));
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::UserResolved(user) => {
                if self.state != SessionState::Initializing {
                    tracing::debug!("ignoring lookup result after initialization");
                    return Vec::new();
                }
                self.authenticate(user)
            },
            AppEvent::UserUnknown => {
                if self.state != SessionState::Initializing {
                    tracing::debug!("ignoring lookup result after initialization");
                    return Vec::new();
                }
                tracing::debug!("unknown key, starting signup");
                self.state = SessionState::Unauthenticated;
                let signup = SignupScreen::new(self.public_key.clone());
                let mut actions = signup.init();
                self.screen = Screen::Signup(signup);
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::LookupFailed { message } => {
                tracing::debug!(%message, "identity lookup failed, staying idle");
                vec![AppAction::Render]
            },
            AppEvent::RegistrationCompleted { user } => {
                if self.state != SessionState::Unauthenticated {
                    tracing::debug!("ignoring registration outside signup");
                    return Vec::new();
                }
                self.authenticate(user)
            },
            other => self.forward(other),
        }
    }

    /// Swap in the feed for `user`.
    fn authenticate(&mut self, user: User) -> Vec<AppAction> {
        tracing::debug!(name = %user.name, "user authenticated, showing feed");
        let feed = FeedScreen::new(user.name.clone());
        let mut actions = feed.init();
        self.screen = Screen::Feed(feed);
        self.user = Some(user);
        self.state = SessionState::Authenticated;
        actions.push(AppAction::Render);
        actions
    }

    fn forward(&mut self, event: AppEvent) -> Vec<AppAction> {
        match &mut self.screen {
            Screen::Signup(signup) => signup.handle(event),
            Screen::Feed(feed) => feed.handle(event),
            Screen::None => Vec::new(),
        }
    }

    /// Current authentication state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Active screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Authenticated user. `None` until lookup or signup succeeds.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Idle banner text.
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Window dimensions (columns, rows).
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// `true` once a quit key has been processed.
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Close the session as if the interrupt key was pressed.
    pub fn quit(&mut self) -> Vec<AppAction> {
        self.handle(AppEvent::Key(KeyInput::INTERRUPT))
    }
}

#[cfg(test)]
mod tests {
    use murmur_store::Post;

    use super::*;

    fn session() -> Session {
        Session::new(SessionParams::new(vec![9; 51]))
    }

    fn ada() -> User {
        User::new("Ada", vec![9; 51])
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    #[test]
    fn init_looks_up_key_and_renders_idle() {
        let session = session();

        assert_eq!(session.init(), vec![
            AppAction::LookupUser { key: vec![9; 51] },
            AppAction::Render
        ]);
        assert_eq!(session.state(), SessionState::Initializing);
        assert!(matches!(session.screen(), Screen::None));
    }

    #[test]
    fn unknown_key_activates_signup() {
        let mut session = session();

        assert_eq!(session.handle(AppEvent::UserUnknown), vec![AppAction::Render]);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert!(matches!(session.screen(), Screen::Signup(_)));
        assert!(session.user().is_none());
    }

    #[test]
    fn resolved_user_activates_feed() {
        let mut session = session();

        assert_eq!(session.handle(AppEvent::UserResolved(ada())), vec![
            AppAction::ListPosts,
            AppAction::Render
        ]);
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ada"));
        assert!(matches!(session.screen(), Screen::Feed(feed) if feed.author() == "Ada"));
    }

    #[test]
    fn lookup_failure_stays_idle() {
        let mut session = session();

        assert_eq!(session.handle(AppEvent::LookupFailed { message: "corrupt".into() }), vec![
            AppAction::Render
        ]);
        assert_eq!(session.state(), SessionState::Initializing);
        assert!(matches!(session.screen(), Screen::None));

        // Input while idle is harmless
        assert!(session.handle(AppEvent::Key(KeyInput::Char('a'))).is_empty());
    }

    #[test]
    fn registration_completed_swaps_signup_for_feed() {
        let mut session = session();
        session.handle(AppEvent::UserUnknown);
        type_text(&mut session, "Ada");

        let actions = session.handle(AppEvent::Key(KeyInput::Enter));
        assert_eq!(actions[0], AppAction::Register { key: vec![9; 51], name: "Ada".into() });

        let actions = session.handle(AppEvent::RegistrationCompleted { user: ada() });
        assert_eq!(actions, vec![AppAction::ListPosts, AppAction::Render]);
        assert_eq!(session.state(), SessionState::Authenticated);
        assert!(matches!(session.screen(), Screen::Feed(_)));
    }

    #[test]
    fn registration_completed_ignored_when_not_signing_up() {
        let mut session = session();

        assert!(session.handle(AppEvent::RegistrationCompleted { user: ada() }).is_empty());
        assert_eq!(session.state(), SessionState::Initializing);

        session.handle(AppEvent::UserResolved(ada()));
        let other = User::new("Mallory", vec![1; 32]);
        assert!(session.handle(AppEvent::RegistrationCompleted { user: other }).is_empty());
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ada"));
    }

    #[test]
    fn quit_keys_close_from_every_state() {
        for setup in [None, Some(AppEvent::UserUnknown), Some(AppEvent::UserResolved(ada()))] {
            for key in [KeyInput::Char('q'), KeyInput::Ctrl('c')] {
                let mut session = session();
                if let Some(event) = setup.clone() {
                    session.handle(event);
                }

                assert_eq!(session.handle(AppEvent::Key(key)), vec![AppAction::Quit]);
                assert!(session.is_closed());
            }
        }
    }

    #[test]
    fn quit_supersedes_open_compose_form() {
        let mut session = session();
        session.handle(AppEvent::UserResolved(ada()));
        type_text(&mut session, "a");
        type_text(&mut session, "hi");

        assert_eq!(session.handle(AppEvent::Key(KeyInput::Char('q'))), vec![AppAction::Quit]);
    }

    #[test]
    fn closed_session_ignores_everything() {
        let mut session = session();
        session.handle(AppEvent::UserResolved(ada()));
        session.quit();

        assert!(session.handle(AppEvent::PostsLoaded(vec![Post::now("Bob", "late")])).is_empty());
        assert!(session.handle(AppEvent::Resize(100, 40)).is_empty());
        assert!(session.handle(AppEvent::Key(KeyInput::Char('a'))).is_empty());
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn resize_records_dimensions() {
        let mut session = session();
        assert_eq!(session.size(), DEFAULT_SIZE);

        assert_eq!(session.handle(AppEvent::Resize(120, 40)), vec![AppAction::Render]);
        assert_eq!(session.size(), (120, 40));
    }

    #[test]
    fn second_lookup_result_is_ignored() {
        let mut session = session();
        session.handle(AppEvent::UserUnknown);

        assert!(session.handle(AppEvent::UserResolved(ada())).is_empty());
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }
}
