//! Friend recipes

use assert_matches::assert_matches;
use kinship::models::{Badge, RequestStatus};
use kinship::KinshipError;

use crate::helpers::{register_and_login, TestContext};

#[tokio::test]
async fn test_accept_awards_branching_out_to_both() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;

    ctx.app.send_friend_request(&alice, "bob").await.unwrap();
    let requests = ctx.app.get_friend_requests(&bob).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].from, "alice");
    assert_eq!(requests[0].to, "bob");
    assert_eq!(requests[0].status, RequestStatus::Pending);

    let accepted = ctx.app.accept_friend_request(&bob, "alice").await.unwrap();
    assert_eq!(accepted.msg, "Accepted request! Badge earned: Branching Out!");

    assert_eq!(ctx.app.get_friends(&alice).await.unwrap(), vec!["bob"]);
    assert_eq!(ctx.app.get_friends(&bob).await.unwrap(), vec!["alice"]);

    for session in [&alice, &bob] {
        let badges = ctx.app.get_badges(session).await.unwrap().unwrap();
        assert!(badges.earned().contains(&Badge::BranchingOut));
    }
}

#[tokio::test]
async fn test_duplicate_and_self_requests() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;

    assert_matches!(
        ctx.app.send_friend_request(&alice, "alice").await,
        Err(KinshipError::NotAllowed(_))
    );
    assert_matches!(
        ctx.app.send_friend_request(&alice, "nobody").await,
        Err(KinshipError::NotFound(_))
    );

    ctx.app.send_friend_request(&alice, "bob").await.unwrap();
    assert_matches!(
        ctx.app.send_friend_request(&bob, "alice").await,
        Err(KinshipError::AlreadyExists(_))
    );
}

#[tokio::test]
async fn test_reject_remove_and_unfriend() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;

    ctx.app.send_friend_request(&alice, "bob").await.unwrap();
    ctx.app.reject_friend_request(&bob, "alice").await.unwrap();
    assert!(ctx.app.get_friends(&bob).await.unwrap().is_empty());

    ctx.app.send_friend_request(&alice, "bob").await.unwrap();
    ctx.app.remove_friend_request(&alice, "bob").await.unwrap();
    assert_matches!(
        ctx.app.accept_friend_request(&bob, "alice").await,
        Err(KinshipError::NotFound(_))
    );

    ctx.app.send_friend_request(&bob, "alice").await.unwrap();
    ctx.app.accept_friend_request(&alice, "bob").await.unwrap();
    ctx.app.remove_friend(&alice, "bob").await.unwrap();
    assert!(ctx.app.get_friends(&bob).await.unwrap().is_empty());
    assert_matches!(
        ctx.app.remove_friend(&bob, "alice").await,
        Err(KinshipError::NotFound(_))
    );
}
