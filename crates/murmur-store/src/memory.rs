#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Post, PublicKey, Store, StoreError, User};

/// In-memory store shared by all sessions of a process.
///
/// Users and posts each sit behind their own `Mutex`, so signups never contend
/// with feed reads. Both sequences are append-only. Clones share the same
/// state. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
    posts: Arc<Mutex<Vec<Post>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> Result<usize, StoreError> {
        Ok(self.users()?.len())
    }

    /// Number of posts in the feed.
    pub fn post_count(&self) -> Result<usize, StoreError> {
        Ok(self.posts()?.len())
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users.lock().map_err(|_| StoreError::Poisoned("users"))
    }

    fn posts(&self) -> Result<MutexGuard<'_, Vec<Post>>, StoreError> {
        self.posts.lock().map_err(|_| StoreError::Poisoned("posts"))
    }
}

impl Store for MemoryStore {
    fn lookup_user(&self, key: &[u8]) -> Result<User, StoreError> {
        let wanted = PublicKey::decode(key)?;

        let users = self.users()?;
        for user in users.iter() {
            // A corrupt record fails the whole lookup rather than reading as a miss
            if user.key()? == wanted {
                return Ok(user.clone());
            }
        }

        Err(StoreError::NotFound)
    }

    fn add_user(&self, key: &[u8], name: &str) -> Result<User, StoreError> {
        let user = User::new(name, key);
        self.users()?.push(user.clone());
        Ok(user)
    }

    fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts()?.clone())
    }

    fn add_post(&self, post: Post) -> Result<(), StoreError> {
        self.posts()?.push(post);
        Ok(())
    }
}
