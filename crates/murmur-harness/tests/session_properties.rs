//! Property-based end-to-end sessions.
//!
//! Each case runs the production runtime on a fresh tokio runtime, so cases
//! stay independent.

use murmur_harness::{Script, SessionSnapshot, fixtures::wire_key, simulate};
use murmur_store::{MemoryStore, Store};
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever name is typed is what gets registered, trimmed.
    #[test]
    fn signup_registers_typed_name(name in "[A-Za-pr-z][A-Za-pr-z ]{0,10}") {
        let store = MemoryStore::new();

        let script = Script::new()
            .wait_for("signup", SessionSnapshot::is_signup_editing)
            .text(&name)
            .enter()
            .wait_for("feed", SessionSnapshot::is_feed)
            .quit();
        let outcome = block_on(simulate(store.clone(), wire_key(1), script));

        prop_assert!(outcome.result.is_ok());
        prop_assert_eq!(store.lookup_user(&wire_key(1)).unwrap().name, name.trim());
    }

    /// Posts composed in one session are listed in the order they were sent.
    #[test]
    fn composed_posts_keep_their_order(bodies in proptest::collection::vec("[a-pr-z]{1,8}", 1..5)) {
        let store = MemoryStore::new();
        store.add_user(&wire_key(1), "Ada").unwrap();

        let mut script = Script::new().wait_for("feed", SessionSnapshot::is_feed);
        for (i, body) in bodies.iter().enumerate() {
            let expected = i + 1;
            script = script
                .text("a")
                .text(body)
                .enter()
                .wait_for(format!("{expected} posts"), move |s| s.posts().len() == expected);
        }
        let outcome = block_on(simulate(store.clone(), wire_key(1), script.quit()));

        prop_assert!(outcome.result.is_ok());
        let stored: Vec<_> = store.list_posts().unwrap().into_iter().map(|p| p.body).collect();
        prop_assert_eq!(&stored, &bodies);

        let last = outcome.last_render().unwrap();
        let shown: Vec<_> = last.posts().iter().map(|p| p.body.clone()).collect();
        prop_assert_eq!(shown, bodies);
    }
}
