//! End-to-end session scenarios.
//!
//! # Test Strategy
//!
//! Each test plays what a user does at the terminal:
//! 1. Connect with a key
//! 2. Wait for the screen the store lookup should produce
//! 3. Type into it
//! 4. Verify the rendered state and the store contents
//!
//! The production `Runtime` runs unchanged; only the driver is simulated.

use chrono::Utc;
use murmur_app::{REQUIRED_MESSAGE, SessionState};
use murmur_harness::{
    ScreenSnapshot, Script, SessionSnapshot, fixtures::{malformed_key, openssh_key, raw_key, wire_key},
    simulate,
};
use murmur_store::{ChaoticStore, MemoryStore, Post, Store, StoreOperation};

/// Wait until the feed shows exactly `n` posts.
fn feed_with(n: usize) -> impl Fn(&SessionSnapshot) -> bool + Send + Sync + 'static {
    move |s| s.is_feed() && s.posts().len() == n
}

#[tokio::test]
async fn unknown_key_signs_up_and_lands_on_empty_feed() {
    let store = MemoryStore::new();

    let script = Script::new()
        .wait_for("signup", SessionSnapshot::is_signup_editing)
        .text("Ada")
        .enter()
        .wait_for("empty feed", feed_with(0))
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;

    let session = outcome.result.expect("session should end cleanly");
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ada"));

    let last = outcome.handle.last_render().expect("rendered");
    assert_eq!(last.user.as_deref(), Some("Ada"));
    assert!(last.posts().is_empty());

    assert_eq!(store.lookup_user(&wire_key(1)).unwrap().name, "Ada");
}

#[tokio::test]
async fn registered_user_composes_a_post() {
    let store = MemoryStore::new();
    store.add_user(&wire_key(1), "Ada").unwrap();
    let submitted_at = Utc::now();

    let script = Script::new()
        .wait_for("feed", feed_with(0))
        .text("a")
        .text("hello world")
        .enter()
        .wait_for("own post", feed_with(1))
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    let last = outcome.handle.last_render().expect("rendered");
    let [post] = last.posts() else { panic!("expected one post, got {:?}", last.posts()) };
    assert_eq!(post.author, "Ada");
    assert_eq!(post.body, "hello world");
    assert!(post.published_at >= submitted_at);
    assert_eq!(last.draft(), None);

    assert_eq!(store.list_posts().unwrap(), vec![post.clone()]);
}

#[tokio::test]
async fn key_registered_in_another_encoding_is_recognised() {
    let store = MemoryStore::new();
    store.add_user(openssh_key(3).as_bytes(), "Grace").unwrap();

    let script = Script::new().wait_for("feed", SessionSnapshot::is_feed).quit();
    let outcome = simulate(store, raw_key(3), script).await;

    let session = outcome.result.expect("session should end cleanly");
    assert_eq!(session.user().map(|u| u.name.as_str()), Some("Grace"));
}

#[tokio::test]
async fn feed_shows_posts_from_other_users_oldest_first() {
    let store = MemoryStore::new();
    store.add_user(&wire_key(1), "Ada").unwrap();
    store.add_post(Post::now("Bob", "first")).unwrap();
    store.add_post(Post::now("Cy", "second\nline")).unwrap();

    let script = Script::new().wait_for("feed", feed_with(2)).quit();
    let outcome = simulate(store, wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    let last = outcome.handle.last_render().expect("rendered");
    let bodies: Vec<_> = last.posts().iter().map(|p| p.body.as_str()).collect();
    assert_eq!(bodies, ["first", "second\nline"]);
}

#[tokio::test]
async fn blank_name_is_rejected_inline() {
    let store = MemoryStore::new();

    let script = Script::new()
        .wait_for("signup", SessionSnapshot::is_signup_editing)
        .text("   ")
        .enter()
        .wait_for("validation", |s| {
            matches!(&s.screen, ScreenSnapshot::Signup { validation: Some(_), .. })
        })
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    let last = outcome.handle.last_render().expect("rendered");
    assert!(matches!(
        &last.screen,
        ScreenSnapshot::Signup { validation: Some(message), registering: false, .. }
            if message == REQUIRED_MESSAGE
    ));
    assert_eq!(store.user_count().unwrap(), 0);
}

#[tokio::test]
async fn quit_issues_no_further_store_operations() {
    let store = ChaoticStore::new(MemoryStore::new(), 0.0);
    store.add_user(&wire_key(1), "Ada").unwrap();
    store.add_post(Post::now("Bob", "hi")).unwrap();

    let script = Script::new().wait_for("feed", feed_with(1)).quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    let session = outcome.result.expect("session should end cleanly");
    assert!(session.is_closed());

    // add_user, add_post, lookup, list
    let after_quit = store.operation_count();
    assert_eq!(after_quit, 4);

    tokio::task::yield_now().await;
    assert_eq!(store.operation_count(), after_quit);
    assert!(outcome.handle.is_stopped());
}

#[tokio::test]
async fn quit_from_signup_registers_nobody() {
    let store = ChaoticStore::new(MemoryStore::new(), 0.0);

    let script = Script::new()
        .wait_for("signup", SessionSnapshot::is_signup_editing)
        .text("Ad")
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    assert_eq!(store.operation_count(), 1);
    assert_eq!(store.inner().user_count().unwrap(), 0);
}

#[tokio::test]
async fn transport_close_ends_session_without_quit() {
    let store = MemoryStore::new();
    store.add_user(&wire_key(1), "Ada").unwrap();

    let script = Script::new().wait_for("feed", SessionSnapshot::is_feed);
    let outcome = simulate(store, wire_key(1), script).await;

    let session = outcome.result.expect("session should end cleanly");
    assert_eq!(session.state(), SessionState::Authenticated);
    assert!(outcome.handle.is_stopped());
}

#[tokio::test]
async fn resize_is_recorded() {
    let store = MemoryStore::new();

    let script = Script::new()
        .wait_for("signup", SessionSnapshot::is_signup_editing)
        .resize(132, 43)
        .wait_for("resized", |s| s.size == (132, 43))
        .quit();
    let outcome = simulate(store, wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");
}

#[tokio::test]
async fn corrupt_store_leaves_session_idle() {
    let store = MemoryStore::new();
    store.add_user(&malformed_key(), "broken").unwrap();
    store.add_user(&wire_key(1), "Ada").unwrap();

    // Initial render plus the one after the failed lookup
    let script = Script::new().wait_for_renders(2).text("abc").quit();
    let outcome = simulate(store, wire_key(1), script).await;

    let session = outcome.result.expect("session should end cleanly");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.user().is_none());

    let renders = outcome.handle.renders();
    assert!(renders.len() >= 2);
    assert!(renders.iter().all(SessionSnapshot::is_idle));
}

#[tokio::test]
async fn registration_failure_is_shown_in_place_of_form() {
    let store = ChaoticStore::new(MemoryStore::new(), 1.0).only(&[StoreOperation::AddUser]);

    let script = Script::new()
        .wait_for("signup", SessionSnapshot::is_signup_editing)
        .text("Ada")
        .enter()
        .wait_for("registration error", |s| s.signup_error().is_some())
        .enter()
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;

    let session = outcome.result.expect("session should end cleanly");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.user().is_none());
    // lookup, failed add_user; the second Enter does not retry
    assert_eq!(store.operation_count(), 2);

    let last = outcome.handle.last_render().expect("rendered");
    assert!(last.signup_error().is_some());
}

#[tokio::test]
async fn failed_post_drops_draft_and_keeps_feed() {
    let store = ChaoticStore::new(MemoryStore::new(), 1.0).only(&[StoreOperation::AddPost]);
    store.inner().add_user(&wire_key(1), "Ada").unwrap();
    store.inner().add_post(Post::now("Bob", "hi")).unwrap();

    // lookup, list, failed add_post
    let probe = store.clone();
    let script = Script::new()
        .wait_for("feed", feed_with(1))
        .text("a")
        .text("lost")
        .enter()
        .wait_for("post attempted", move |s| s.draft().is_none() && probe.operation_count() == 3)
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    let last = outcome.handle.last_render().expect("rendered");
    assert_eq!(last.posts().len(), 1);
    assert_eq!(last.draft(), None);
    assert_eq!(store.inner().post_count().unwrap(), 1);
}

#[tokio::test]
async fn failed_listing_keeps_stale_feed() {
    let store = ChaoticStore::new(MemoryStore::new(), 1.0).only(&[StoreOperation::ListPosts]);
    store.inner().add_user(&wire_key(1), "Ada").unwrap();

    // lookup, failed list, add_post, failed list
    let probe = store.clone();
    let script = Script::new()
        .wait_for("feed", SessionSnapshot::is_feed)
        .text("a")
        .text("hello")
        .enter()
        .wait_for("post stored", move |_| probe.operation_count() == 4)
        .quit();
    let outcome = simulate(store.clone(), wire_key(1), script).await;
    outcome.result.expect("session should end cleanly");

    // The post was stored even though no listing could show it
    assert_eq!(store.inner().post_count().unwrap(), 1);
    assert!(outcome.handle.last_render().expect("rendered").posts().is_empty());
}

#[tokio::test]
async fn concurrent_sessions_share_one_feed() {
    let store = MemoryStore::new();
    for seed in 1..=4u8 {
        store.add_user(&wire_key(seed), &format!("user{seed}")).unwrap();
    }

    let sessions: Vec<_> = (1..=4u8)
        .map(|seed| {
            let store = store.clone();
            tokio::spawn(async move {
                let script = Script::new()
                    .wait_for("feed", SessionSnapshot::is_feed)
                    .text("a")
                    .text(&format!("from {seed}"))
                    .enter()
                    .wait_for("own post listed", move |s| {
                        s.posts().iter().any(|p| p.body == format!("from {seed}"))
                    })
                    .quit();
                simulate(store, wire_key(seed), script).await
            })
        })
        .collect();

    for session in sessions {
        let outcome = session.await.expect("task should not panic");
        outcome.result.expect("session should end cleanly");
    }

    let posts = store.list_posts().unwrap();
    assert_eq!(posts.len(), 4);
    for seed in 1..=4u8 {
        let post = posts.iter().find(|p| p.body == format!("from {seed}")).expect("post present");
        assert_eq!(post.author, format!("user{seed}"));
    }
}
