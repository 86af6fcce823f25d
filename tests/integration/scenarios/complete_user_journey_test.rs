//! From registration to running a group

use kinship::models::Badge;
use kinship::Session;

use crate::helpers::{TestContext, TEST_PASSWORD};

#[tokio::test]
async fn test_complete_user_journey() {
    let ctx = TestContext::new();
    let app = &ctx.app;

    let mut alice = Session::new();
    app.create_user(&alice, "alice", TEST_PASSWORD).await.unwrap();
    app.login(&mut alice, "alice", TEST_PASSWORD).await.unwrap();

    let mut bob = Session::new();
    app.create_user(&bob, "bob", TEST_PASSWORD).await.unwrap();
    app.login(&mut bob, "bob", TEST_PASSWORD).await.unwrap();

    // not yet eligible
    let refused = app.create_group(&alice, "Hikers", "Weekend hikes").await.unwrap();
    assert_eq!(refused.missing_badges, vec![Badge::CommentGuru, Badge::PostSuperstar]);

    let post = app
        .create_post(&alice, "Anyone up for Mount Monadnock?", None)
        .await
        .unwrap()
        .value;
    app.create_comment(&bob, "Count me in", post.id).await.unwrap();
    app.create_comment(&alice, "Great, Saturday then", post.id).await.unwrap();

    let created = app.create_group(&alice, "Hikers", "Weekend hikes").await.unwrap();
    assert!(created.is_created());

    app.send_friend_request(&bob, "alice").await.unwrap();
    app.accept_friend_request(&alice, "bob").await.unwrap();
    app.join_group(&bob, "Hikers").await.unwrap();

    let alice_badges = app.get_badges(&alice).await.unwrap().unwrap();
    assert_eq!(
        alice_badges.earned(),
        vec![
            Badge::GettingStarted,
            Badge::BranchingOut,
            Badge::PostSuperstar,
            Badge::CommentGuru
        ]
    );
    let bob_badges = app.get_badges(&bob).await.unwrap().unwrap();
    assert_eq!(
        bob_badges.earned(),
        vec![
            Badge::GettingStarted,
            Badge::BuildingCommunity,
            Badge::BranchingOut,
            Badge::CommentGuru
        ]
    );

    let groups = app.get_user_groups("bob").await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group_owner, "alice");
    assert_eq!(groups[0].group_members, vec!["bob"]);

    app.logout(&mut bob).await.unwrap();
    assert_eq!(app.get_comments(Some("bob")).await.unwrap().len(), 1);
}
