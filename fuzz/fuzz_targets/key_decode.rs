//! Fuzz target for PublicKey::decode
//!
//! Feeds arbitrary bytes to the key decoder to find:
//! - Parser crashes or panics
//! - Length fields in wire blobs that over-read
//! - Inputs that decode in one encoding and re-encode differently
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use murmur_store::PublicKey;

fuzz_target!(|data: &[u8]| {
    let Ok(key) = PublicKey::decode(data) else {
        return;
    };

    // Every encoding of a decoded key must decode back to it
    assert_eq!(PublicKey::decode(key.as_bytes()), Ok(key));
    assert_eq!(PublicKey::decode(&key.to_wire()), Ok(key));
    assert_eq!(PublicKey::decode(key.to_openssh().as_bytes()), Ok(key));
});
