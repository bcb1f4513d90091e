//! Chaotic store wrapper for fault injection testing
//!
//! Delegates to an underlying store but fails operations at a configured rate
//! so tests can drive every recovery path of the session screens.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{Post, Store, StoreError, User};

/// Store operations that can be selected for fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// [`Store::lookup_user`]
    LookupUser,
    /// [`Store::add_user`]
    AddUser,
    /// [`Store::list_posts`]
    ListPosts,
    /// [`Store::add_post`]
    AddPost,
}

/// Store wrapper that injects [`StoreError::Unavailable`] failures.
///
/// Failures are drawn from a seeded generator so a run is reproducible. By
/// default every operation is eligible; [`ChaoticStore::only`] narrows the
/// set. Every attempted operation is counted, failed or not.
#[derive(Clone)]
pub struct ChaoticStore<S: Store> {
    inner: S,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    /// Operations eligible for failure. `None` means all.
    targets: Option<Vec<StoreOperation>>,
    rng: Arc<Mutex<ChaoticRng>>,
    operation_count: Arc<AtomicUsize>,
}

/// Linear congruential generator; deterministic per seed.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // LCG constants from Numerical Recipes
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<S: Store> ChaoticStore<S> {
    /// Wrap `inner`, failing eligible operations with probability
    /// `failure_rate`.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: S, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Create with an explicit seed for reproducible chaos.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    #[allow(clippy::panic)]
    pub fn with_seed(inner: S, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            targets: None,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            operation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Restrict fault injection to the given operations.
    #[must_use]
    pub fn only(mut self, operations: &[StoreOperation]) -> Self {
        self.targets = Some(operations.to_vec());
        self
    }

    /// Underlying store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Total number of store operations attempted through this wrapper.
    pub fn operation_count(&self) -> usize {
        self.operation_count.load(Ordering::SeqCst)
    }

    /// Count the operation and decide whether it fails.
    fn attempt(&self, operation: StoreOperation) -> Result<(), StoreError> {
        self.operation_count.fetch_add(1, Ordering::SeqCst);

        let eligible = self.targets.as_ref().is_none_or(|targets| targets.contains(&operation));
        if !eligible {
            return Ok(());
        }

        let roll = self.rng.lock().map_err(|_| StoreError::Poisoned("chaos rng"))?.next();
        if roll < self.failure_rate {
            return Err(StoreError::Unavailable(format!(
                "chaotic failure injection ({operation:?})"
            )));
        }
        Ok(())
    }
}

impl<S: Store> Store for ChaoticStore<S> {
    fn lookup_user(&self, key: &[u8]) -> Result<User, StoreError> {
        self.attempt(StoreOperation::LookupUser)?;
        self.inner.lookup_user(key)
    }

    fn add_user(&self, key: &[u8], name: &str) -> Result<User, StoreError> {
        self.attempt(StoreOperation::AddUser)?;
        self.inner.add_user(key, name)
    }

    fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.attempt(StoreOperation::ListPosts)?;
        self.inner.list_posts()
    }

    fn add_post(&self, post: Post) -> Result<(), StoreError> {
        self.attempt(StoreOperation::AddPost)?;
        self.inner.add_post(post)
    }
}
