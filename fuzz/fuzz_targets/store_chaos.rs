//! Fuzz target for the store under injected failures
//!
//! Runs arbitrary operation sequences against a ChaoticStore and checks the
//! results against a plain model of what succeeded.
//!
//! # Invariants
//!
//! - The store NEVER panics on injected failures
//! - A failed append leaves no trace
//! - Every registered key looks up to its first registration
//! - Listings are exactly the successful posts, in order

#![no_main]

use arbitrary::Arbitrary;
use ed25519_dalek::SigningKey;
use libfuzzer_sys::fuzz_target;
use murmur_store::{ChaoticStore, MemoryStore, Post, PublicKey, Store, StoreError};

#[derive(Debug, Clone, Arbitrary)]
struct ChaosScenario {
    /// Seed for ChaoticStore RNG (deterministic failures)
    chaos_seed: u64,
    /// Failure rate 0-9 maps to 0%-90%
    failure_rate_tenth: u8,
    /// Sequence of operations to perform
    operations: Vec<ChaosOperation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum ChaosOperation {
    /// Register a key derived from `seed`
    Register { seed: u8, name: String },
    /// Look up a key derived from `seed`
    Lookup { seed: u8 },
    /// Look up arbitrary bytes
    LookupRaw { bytes: Vec<u8> },
    /// Append a post
    Publish { body: String },
    /// List posts
    List,
}

fn wire_key(seed: u8) -> Vec<u8> {
    let key = PublicKey::from(SigningKey::from_bytes(&[seed; 32]).verifying_key());
    key.to_wire()
}

fuzz_target!(|scenario: ChaosScenario| {
    let rate = f64::from(scenario.failure_rate_tenth % 10) / 10.0;
    let store = ChaoticStore::with_seed(MemoryStore::new(), rate, scenario.chaos_seed);

    let mut users: Vec<(u8, String)> = Vec::new();
    let mut posts: Vec<String> = Vec::new();

    for operation in scenario.operations {
        match operation {
            ChaosOperation::Register { seed, name } => {
                if store.add_user(&wire_key(seed), &name).is_ok() {
                    users.push((seed, name));
                }
            },
            ChaosOperation::Lookup { seed } => match store.lookup_user(&wire_key(seed)) {
                Ok(user) => {
                    let expected = users.iter().find(|(s, _)| *s == seed).map(|(_, n)| n);
                    assert_eq!(Some(&user.name), expected);
                },
                Err(StoreError::NotFound) => assert!(users.iter().all(|(s, _)| *s != seed)),
                Err(StoreError::Unavailable(_)) => {},
                Err(other) => panic!("unexpected lookup error: {other}"),
            },
            ChaosOperation::LookupRaw { bytes } => {
                let _ = store.lookup_user(&bytes);
            },
            ChaosOperation::Publish { body } => {
                if store.add_post(Post::now("fuzz", body.clone())).is_ok() {
                    posts.push(body);
                }
            },
            ChaosOperation::List => {
                if let Ok(listed) = store.list_posts() {
                    let bodies: Vec<_> = listed.into_iter().map(|p| p.body).collect();
                    assert_eq!(bodies, posts);
                }
            },
        }
    }
});
