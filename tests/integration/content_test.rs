//! Post and comment recipes

use assert_matches::assert_matches;
use kinship::models::{DocId, PostOptions};
use kinship::KinshipError;

use crate::helpers::{post_as, register_and_login, TestContext};

#[tokio::test]
async fn test_posts_by_author_with_usernames() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;

    let options = PostOptions {
        background_color: Some("#ddeeff".to_string()),
    };
    ctx.app.create_post(&alice, "from alice", Some(options.clone())).await.unwrap();
    post_as(&ctx.app, &bob, "from bob").await;

    let all = ctx.app.get_posts(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let by_alice = ctx.app.get_posts(Some("alice")).await.unwrap();
    assert_eq!(by_alice.len(), 1);
    assert_eq!(by_alice[0].author, "alice");
    assert_eq!(by_alice[0].options, Some(options));
}

#[tokio::test]
async fn test_only_author_edits_post() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    let post = post_as(&ctx.app, &alice, "original").await;

    assert_matches!(
        ctx.app.update_post(&bob, post, Some("hijacked"), None).await,
        Err(KinshipError::NotAllowed(_))
    );
    assert_matches!(
        ctx.app.delete_post(&bob, post).await,
        Err(KinshipError::NotAllowed(_))
    );

    let updated = ctx.app.update_post(&alice, post, Some("edited"), None).await.unwrap();
    assert_eq!(updated.value.content, "edited");
    ctx.app.delete_post(&alice, post).await.unwrap();
    assert!(ctx.app.get_posts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_requires_existing_post() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;

    assert_matches!(
        ctx.app.create_comment(&alice, "into the void", DocId::new()).await,
        Err(KinshipError::NotFound(_))
    );
    assert!(ctx.app.get_comments(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_comments_by_post_and_author() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    let post = post_as(&ctx.app, &alice, "hello").await;
    let other = post_as(&ctx.app, &bob, "hi").await;

    ctx.app.create_comment(&bob, "welcome", post).await.unwrap();
    ctx.app.create_comment(&alice, "thanks", post).await.unwrap();
    ctx.app.create_comment(&alice, "hi back", other).await.unwrap();

    assert_eq!(ctx.app.get_post_comments(post).await.unwrap().len(), 2);
    let by_alice = ctx.app.get_comments(Some("alice")).await.unwrap();
    assert_eq!(by_alice.len(), 2);
    assert!(by_alice.iter().all(|c| c.author == "alice"));
}

#[tokio::test]
async fn test_only_author_edits_comment() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    let post = post_as(&ctx.app, &alice, "hello").await;
    let comment = ctx.app.create_comment(&bob, "first!", post).await.unwrap().value;

    assert_matches!(
        ctx.app.update_comment(&alice, comment.id, "edited by alice").await,
        Err(KinshipError::NotAllowed(_))
    );
    let updated = ctx.app.update_comment(&bob, comment.id, "second!").await.unwrap();
    assert_eq!(updated.value.content, "second!");

    assert_matches!(
        ctx.app.delete_comment(&alice, comment.id).await,
        Err(KinshipError::NotAllowed(_))
    );
    ctx.app.delete_comment(&bob, comment.id).await.unwrap();
    assert!(ctx.app.get_post_comments(post).await.unwrap().is_empty());
}
