//! Observable session snapshots for invariant checking.
//!
//! A snapshot captures what a renderer would see at one point in time.
//! Invariants and scenario oracles operate on snapshots rather than live
//! state, so checks are consistent and can compare renders over time.

use murmur_app::{FeedScreen, Screen, Session, SessionState, SignupScreen, SignupState};
use murmur_store::Post;

/// Snapshot of one session as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Authentication state.
    pub state: SessionState,
    /// Window dimensions (columns, rows).
    pub size: (u16, u16),
    /// Authenticated user's name. `None` before authentication.
    pub user: Option<String>,
    /// Active screen contents.
    pub screen: ScreenSnapshot,
}

/// Snapshot of the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSnapshot {
    /// Idle banner, no screen active.
    Idle {
        /// Banner text.
        banner: String,
    },
    /// Signup form.
    Signup {
        /// Name typed so far.
        name: String,
        /// Form validation message.
        validation: Option<String>,
        /// Registration issued and pending.
        registering: bool,
        /// Registration error shown in place of the form.
        error: Option<String>,
    },
    /// Post list.
    Feed {
        /// Name posts are attributed to.
        author: String,
        /// Displayed posts, oldest first.
        posts: Vec<Post>,
        /// Open compose draft. `None` while browsing.
        draft: Option<String>,
    },
}

impl SessionSnapshot {
    /// Capture the observable state of `session`.
    pub fn from_session(session: &Session) -> Self {
        let screen = match session.screen() {
            Screen::None => ScreenSnapshot::Idle { banner: session.banner().to_string() },
            Screen::Signup(signup) => signup_snapshot(signup),
            Screen::Feed(feed) => feed_snapshot(feed),
        };

        Self {
            state: session.state(),
            size: session.size(),
            user: session.user().map(|u| u.name.clone()),
            screen,
        }
    }

    /// Displayed posts. Empty unless the feed is active.
    pub fn posts(&self) -> &[Post] {
        match &self.screen {
            ScreenSnapshot::Feed { posts, .. } => posts,
            ScreenSnapshot::Idle { .. } | ScreenSnapshot::Signup { .. } => &[],
        }
    }

    /// `true` while the signup form is active and accepting input.
    pub fn is_signup_editing(&self) -> bool {
        matches!(&self.screen, ScreenSnapshot::Signup { registering: false, error: None, .. })
    }

    /// `true` while the feed is active.
    pub fn is_feed(&self) -> bool {
        matches!(self.screen, ScreenSnapshot::Feed { .. })
    }

    /// `true` while the idle banner is shown.
    pub fn is_idle(&self) -> bool {
        matches!(self.screen, ScreenSnapshot::Idle { .. })
    }

    /// Registration error. `None` unless signup failed.
    pub fn signup_error(&self) -> Option<&str> {
        match &self.screen {
            ScreenSnapshot::Signup { error, .. } => error.as_deref(),
            ScreenSnapshot::Idle { .. } | ScreenSnapshot::Feed { .. } => None,
        }
    }

    /// Open compose draft. `None` unless composing.
    pub fn draft(&self) -> Option<&str> {
        match &self.screen {
            ScreenSnapshot::Feed { draft, .. } => draft.as_deref(),
            ScreenSnapshot::Idle { .. } | ScreenSnapshot::Signup { .. } => None,
        }
    }
}

fn signup_snapshot(signup: &SignupScreen) -> ScreenSnapshot {
    ScreenSnapshot::Signup {
        name: signup.form().value().to_string(),
        validation: signup.form().error().map(str::to_string),
        registering: matches!(signup.state(), SignupState::Registering { .. }),
        error: signup.error().map(str::to_string),
    }
}

fn feed_snapshot(feed: &FeedScreen) -> ScreenSnapshot {
    ScreenSnapshot::Feed {
        author: feed.author().to_string(),
        posts: feed.posts().to_vec(),
        draft: feed.draft().map(|form| form.value().to_string()),
    }
}
