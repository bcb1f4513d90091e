//! Property-based tests for the shared store.
//!
//! Lookups must ignore key encoding, misses and corruption must stay
//! distinguishable, and concurrent appends must never lose records.

use std::thread;

use ed25519_dalek::SigningKey;
use murmur_store::{KeyError, MemoryStore, Post, PublicKey, Store, StoreError};
use proptest::prelude::*;

fn key(seed: [u8; 32]) -> PublicKey {
    PublicKey::from(SigningKey::from_bytes(&seed).verifying_key())
}

/// Encodings a client might present for the same key.
#[derive(Debug, Clone, Copy)]
enum Encoding {
    Raw,
    Wire,
    OpenSsh,
}

impl Encoding {
    fn encode(self, key: &PublicKey) -> Vec<u8> {
        match self {
            Self::Raw => key.as_bytes().to_vec(),
            Self::Wire => key.to_wire(),
            Self::OpenSsh => key.to_openssh().into_bytes(),
        }
    }
}

fn encoding_strategy() -> impl Strategy<Value = Encoding> {
    prop_oneof![Just(Encoding::Raw), Just(Encoding::Wire), Just(Encoding::OpenSsh)]
}

proptest! {
    #[test]
    fn lookup_ignores_encoding(
        seed in any::<[u8; 32]>(),
        name in "[a-z]{1,12}",
        stored in encoding_strategy(),
        queried in encoding_strategy(),
    ) {
        let store = MemoryStore::new();
        let key = key(seed);
        store.add_user(&stored.encode(&key), &name).unwrap();

        let user = store.lookup_user(&queried.encode(&key)).unwrap();
        prop_assert_eq!(user.name, name);
        prop_assert_eq!(user.public_key, stored.encode(&key));
    }

    #[test]
    fn unregistered_key_is_not_found(
        registered in any::<[u8; 32]>(),
        other in any::<[u8; 32]>(),
    ) {
        prop_assume!(registered != other);
        let store = MemoryStore::new();
        store.add_user(&key(registered).to_wire(), "ada").unwrap();

        prop_assert_eq!(store.lookup_user(&key(other).to_wire()), Err(StoreError::NotFound));
    }

    #[test]
    fn corrupt_record_ahead_of_match_is_decode_error(seed in any::<[u8; 32]>()) {
        let store = MemoryStore::new();
        let mut corrupt = vec![0u8; 32];
        corrupt[0] = 2;
        store.add_user(&corrupt, "broken").unwrap();
        store.add_user(&key(seed).to_wire(), "ada").unwrap();

        prop_assert_eq!(
            store.lookup_user(&key(seed).to_wire()),
            Err(StoreError::Decode(KeyError::InvalidPoint))
        );
    }

    #[test]
    fn garbage_query_never_reads_as_miss(bytes in proptest::collection::vec(any::<u8>(), 0..80)) {
        let store = MemoryStore::new();

        // Either the bytes decode to some key (then it's a plain miss) or the
        // lookup reports a decode failure. Never anything else.
        match store.lookup_user(&bytes) {
            Err(StoreError::NotFound) => prop_assert!(PublicKey::decode(&bytes).is_ok()),
            Err(StoreError::Decode(_)) => prop_assert!(PublicKey::decode(&bytes).is_err()),
            other => prop_assert!(false, "unexpected result: {other:?}"),
        }
    }
}

#[test]
fn concurrent_registrations_are_all_resolvable() {
    let store = MemoryStore::new();

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let key = key([i + 1; 32]);
                store.add_user(&key.to_wire(), &format!("user-{i}")).unwrap();
                store.lookup_user(key.as_bytes()).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().name, format!("user-{i}"));
    }
    assert_eq!(store.user_count().unwrap(), 8);
}

#[test]
fn concurrent_posts_are_all_kept_in_per_writer_order() {
    const WRITERS: usize = 6;
    const PER_WRITER: usize = 50;

    let store = MemoryStore::new();
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let store = store.clone();
            thread::spawn(move || {
                for n in 0..PER_WRITER {
                    store.add_post(Post::now(format!("w{writer}"), n.to_string())).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let posts = store.list_posts().unwrap();
    assert_eq!(posts.len(), WRITERS * PER_WRITER);

    for writer in 0..WRITERS {
        let author = format!("w{writer}");
        let bodies: Vec<usize> = posts
            .iter()
            .filter(|post| post.author == author)
            .map(|post| post.body.parse().unwrap())
            .collect();
        assert_eq!(bodies, (0..PER_WRITER).collect::<Vec<_>>());
    }
}
