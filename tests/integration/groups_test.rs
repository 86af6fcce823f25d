//! Group recipes, including the badge gate on creation

use assert_matches::assert_matches;
use kinship::models::Badge;
use kinship::KinshipError;

use crate::helpers::{earn_group_prerequisites, register, register_and_login, TestContext};

#[tokio::test]
async fn test_create_group_without_any_badges() {
    let ctx = TestContext::new();
    let alice = register(&ctx.app, "alice").await;
    let session = ctx.session_for(alice.id);

    let response = ctx.app.create_group(&session, "Hikers", "desc").await.unwrap();
    assert!(!response.is_created());
    assert_eq!(
        response.msg,
        "You are unable to create a group because you are missing the following badges: \
         Comment Guru, Post Superstar, Getting Started: Created Account"
    );
    assert_eq!(response.missing_badges, Badge::GROUP_PREREQUISITES.to_vec());
    assert!(ctx.app.get_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_group_lists_only_missing_badges() {
    let ctx = TestContext::new();
    let (session, _) = register_and_login(&ctx.app, "alice").await;
    crate::helpers::post_as(&ctx.app, &session, "hello").await;

    let response = ctx.app.create_group(&session, "Hikers", "desc").await.unwrap();
    assert_eq!(response.missing_badges, vec![Badge::CommentGuru]);
    assert!(response.msg.ends_with("missing the following badges: Comment Guru"));
    assert!(ctx.app.get_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_group_after_earning_prerequisites() {
    let ctx = TestContext::new();
    let (session, _) = register_and_login(&ctx.app, "alice").await;

    let refused = ctx.app.create_group(&session, "Hikers", "desc").await.unwrap();
    assert_eq!(refused.missing_badges, vec![Badge::CommentGuru, Badge::PostSuperstar]);

    earn_group_prerequisites(&ctx.app, &session).await;
    let created = ctx.app.create_group(&session, "Hikers", "desc").await.unwrap();
    assert!(created.is_created());
    assert!(created.missing_badges.is_empty());
    assert_eq!(created.msg, "Group successfully created!");

    let groups = ctx.app.get_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group_name, "Hikers");
    assert_eq!(groups[0].group_owner, "alice");
    assert!(groups[0].group_members.is_empty());

    assert_matches!(
        ctx.app.create_group(&session, "Hikers", "again").await,
        Err(KinshipError::AlreadyExists(_))
    );
    assert_eq!(ctx.app.get_groups().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_join_and_leave_scenario() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    earn_group_prerequisites(&ctx.app, &alice).await;
    ctx.app.create_group(&alice, "Hikers", "desc").await.unwrap();

    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    let joined = ctx.app.join_group(&bob, "Hikers").await.unwrap();
    assert_eq!(joined.value.group_members, vec!["bob"]);
    assert_eq!(joined.msg, "Successfully joined group! Badge earned: Building Community!");

    assert_matches!(
        ctx.app.join_group(&bob, "Hikers").await,
        Err(KinshipError::AlreadyMember { .. })
    );
    assert_matches!(
        ctx.app.join_group(&alice, "Hikers").await,
        Err(KinshipError::AlreadyMember { .. })
    );

    let left = ctx.app.leave_group(&bob, "Hikers").await.unwrap();
    assert!(left.value.group_members.is_empty());
    assert_matches!(
        ctx.app.leave_group(&bob, "Hikers").await,
        Err(KinshipError::NotFound(_))
    );

    // rejoining does not award the badge twice
    let rejoined = ctx.app.join_group(&bob, "Hikers").await.unwrap();
    assert_eq!(rejoined.msg, "Successfully joined group!");
}

#[tokio::test]
async fn test_join_missing_group() {
    let ctx = TestContext::new();
    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    assert_matches!(
        ctx.app.join_group(&bob, "Nowhere").await,
        Err(KinshipError::NotFound(_))
    );
    let badges = ctx.app.get_badges(&bob).await.unwrap().unwrap();
    assert!(!badges.earned().contains(&Badge::BuildingCommunity));
}

#[tokio::test]
async fn test_ownership_gate() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    earn_group_prerequisites(&ctx.app, &alice).await;
    let group = ctx
        .app
        .create_group(&alice, "Hikers", "desc")
        .await
        .unwrap()
        .group
        .unwrap();
    ctx.app.create_group(&alice, "Climbers", "desc").await.unwrap();

    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    ctx.app.join_group(&bob, "Hikers").await.unwrap();

    assert_matches!(
        ctx.app.delete_group(&bob, "Hikers").await,
        Err(KinshipError::NotOwner { .. })
    );
    assert_matches!(
        ctx.app.edit_group_name(&bob, group.id, "Bob's Hikers").await,
        Err(KinshipError::NotOwner { .. })
    );
    assert_matches!(
        ctx.app.edit_group_description(&bob, group.id, "mine now").await,
        Err(KinshipError::NotOwner { .. })
    );

    assert_matches!(
        ctx.app.edit_group_name(&alice, group.id, "Climbers").await,
        Err(KinshipError::AlreadyExists(_))
    );
    let renamed = ctx.app.edit_group_name(&alice, group.id, "Walkers").await.unwrap();
    assert_eq!(renamed.value.group_name, "Walkers");
    assert_eq!(renamed.value.group_members, vec!["bob"]);
    let described = ctx
        .app
        .edit_group_description(&alice, group.id, "slow walks")
        .await
        .unwrap();
    assert_eq!(described.value.group_description, "slow walks");

    // deleting ignores remaining members
    ctx.app.delete_group(&alice, "Walkers").await.unwrap();
    let names: Vec<_> = ctx
        .app
        .get_groups()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.group_name)
        .collect();
    assert_eq!(names, vec!["Climbers"]);
}

#[tokio::test]
async fn test_user_groups_by_username() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    earn_group_prerequisites(&ctx.app, &alice).await;
    ctx.app.create_group(&alice, "Hikers", "desc").await.unwrap();
    ctx.app.create_group(&alice, "Climbers", "desc").await.unwrap();

    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    ctx.app.join_group(&bob, "Climbers").await.unwrap();

    assert_eq!(ctx.app.get_user_groups("alice").await.unwrap().len(), 2);
    let bobs = ctx.app.get_user_groups("bob").await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].group_name, "Climbers");
    assert_matches!(
        ctx.app.get_user_groups("carol").await,
        Err(KinshipError::NotFound(_))
    );
}
