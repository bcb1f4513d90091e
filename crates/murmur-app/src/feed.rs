//! Feed screen.
//!
//! Shows every post, oldest first, and offers a compose form on `a`. Store
//! results replace the displayed list wholesale; failures keep whatever was
//! last shown.

use murmur_store::Post;

use crate::{AppAction, AppEvent, FormOutcome, KeyInput, TextForm};

/// Title of the compose field.
pub const COMPOSE_TITLE: &str = "Post";

/// Key that opens the compose form.
pub const COMPOSE_KEY: char = 'a';

/// Feed interaction mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMode {
    /// Reading the list.
    Browsing,
    /// Compose form open below the list.
    Composing(TextForm),
}

/// Screen shown to an authenticated user.
#[derive(Debug, Clone)]
pub struct FeedScreen {
    author: String,
    posts: Vec<Post>,
    mode: FeedMode,
}

impl FeedScreen {
    /// Create a feed screen posting as `author`.
    pub fn new(author: impl Into<String>) -> Self {
        Self { author: author.into(), posts: Vec::new(), mode: FeedMode::Browsing }
    }

    /// Actions to run when the screen becomes active.
    pub fn init(&self) -> Vec<AppAction> {
        vec![AppAction::ListPosts]
    }

    /// Process an event routed from the session.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::PostsLoaded(posts) => {
                self.posts = posts;
                vec![AppAction::Render]
            },
            AppEvent::PostsFetchFailed { message } => {
                tracing::debug!(%message, posts = self.posts.len(), "keeping stale feed");
                Vec::new()
            },
            AppEvent::PostFailed { message } => {
                tracing::debug!(%message, "post dropped");
                Vec::new()
            },
            AppEvent::Resize(..) => Vec::new(),
            other => {
                tracing::debug!(event = ?other, "feed ignoring event");
                Vec::new()
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.mode == FeedMode::Browsing {
            if key == KeyInput::Char(COMPOSE_KEY) {
                self.mode = FeedMode::Composing(Self::compose_form());
                return vec![AppAction::Render];
            }
            return Vec::new();
        }

        let FeedMode::Composing(form) = &mut self.mode else {
            return Vec::new();
        };

        match form.handle_key(key) {
            Some(FormOutcome::Submitted(body)) => {
                // Draft is discarded now; a failed append does not restore it
                self.mode = FeedMode::Browsing;
                let post = Post::now(self.author.clone(), body);
                vec![AppAction::PublishPost { post }, AppAction::Render]
            },
            Some(FormOutcome::Aborted) => {
                self.mode = FeedMode::Browsing;
                vec![AppAction::Render]
            },
            None => vec![AppAction::Render],
        }
    }

    fn compose_form() -> TextForm {
        TextForm::new(COMPOSE_TITLE).multiline().cancellable()
    }

    /// Name posts are attributed to.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Displayed posts, oldest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Current mode.
    pub fn mode(&self) -> &FeedMode {
        &self.mode
    }

    /// Open compose form. `None` while browsing.
    pub fn draft(&self) -> Option<&TextForm> {
        match &self.mode {
            FeedMode::Composing(form) => Some(form),
            FeedMode::Browsing => None,
        }
    }
}
