//! Standard session invariants.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use murmur_app::SessionState;

use super::{Invariant, InvariantResult, ScreenSnapshot, SessionSnapshot, Violation};

/// The active screen must agree with the session state.
///
/// Initializing shows the idle banner, Unauthenticated shows signup and
/// Authenticated shows the feed. A closed session may show anything.
pub struct ScreenMatchesState;

impl Invariant for ScreenMatchesState {
    fn name(&self) -> &'static str {
        "screen_matches_state"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        let Some(current) = history.last() else {
            return Ok(());
        };

        let consistent = match (current.state, &current.screen) {
            (SessionState::Initializing, ScreenSnapshot::Idle { .. })
            | (SessionState::Unauthenticated, ScreenSnapshot::Signup { .. })
            | (SessionState::Authenticated, ScreenSnapshot::Feed { .. })
            | (SessionState::Closed, _) => true,
            _ => false,
        };

        if consistent {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!("state {:?} rendered {:?}", current.state, current.screen),
            })
        }
    }
}

/// The feed must post as the authenticated user.
pub struct FeedAuthorIsUser;

impl Invariant for FeedAuthorIsUser {
    fn name(&self) -> &'static str {
        "feed_author_is_user"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        let Some(current) = history.last() else {
            return Ok(());
        };

        if let ScreenSnapshot::Feed { author, .. } = &current.screen
            && current.user.as_deref() != Some(author.as_str())
        {
            return Err(Violation {
                invariant: self.name(),
                message: format!("feed author {author:?} but user {:?}", current.user),
            });
        }
        Ok(())
    }
}

/// Session state only moves forward.
///
/// Initializing -> {Unauthenticated, Authenticated} -> Closed, with
/// Unauthenticated -> Authenticated after signup.
pub struct MonotonicState;

impl MonotonicState {
    fn rank(state: SessionState) -> u8 {
        match state {
            SessionState::Initializing => 0,
            SessionState::Unauthenticated => 1,
            SessionState::Authenticated => 2,
            SessionState::Closed => 3,
        }
    }
}

impl Invariant for MonotonicState {
    fn name(&self) -> &'static str {
        "monotonic_state"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        for pair in history.windows(2) {
            let [earlier, later] = pair else { continue };
            if Self::rank(later.state) < Self::rank(earlier.state) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("state went {:?} -> {:?}", earlier.state, later.state),
                });
            }
        }
        Ok(())
    }
}

/// Each feed listing extends the one rendered before it.
///
/// The store is append-only and a session's listings are served in order, so
/// an earlier render's posts are always a prefix of a later render's.
pub struct FeedAppendOnly;

impl Invariant for FeedAppendOnly {
    fn name(&self) -> &'static str {
        "feed_append_only"
    }

    fn check(&self, history: &[SessionSnapshot]) -> InvariantResult {
        let mut previous: Option<&SessionSnapshot> = None;

        for snapshot in history.iter().filter(|s| s.is_feed()) {
            if let Some(earlier) = previous {
                let (before, after) = (earlier.posts(), snapshot.posts());
                if !after.starts_with(before) {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!(
                            "feed of {} posts is not an extension of the previous {}",
                            after.len(),
                            before.len()
                        ),
                    });
                }
            }
            previous = Some(snapshot);
        }
        Ok(())
    }
}
