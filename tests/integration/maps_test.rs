//! Location sharing recipes

use assert_matches::assert_matches;
use kinship::KinshipError;

use crate::helpers::{register_and_login, TestContext};

#[tokio::test]
async fn test_find_nearby_excludes_self() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    let (bob, _) = register_and_login(&ctx.app, "bob").await;
    let (carol, _) = register_and_login(&ctx.app, "carol").await;

    ctx.app.opt_in_location(&alice, "Cambridge", "MA").await.unwrap();
    ctx.app.opt_in_location(&bob, "cambridge", "ma").await.unwrap();
    ctx.app.opt_in_location(&carol, "Boston", "MA").await.unwrap();

    assert_eq!(ctx.app.find_nearby(&alice, None).await.unwrap(), vec!["bob"]);
    assert_eq!(
        ctx.app.find_nearby(&alice, Some(("Boston", "MA"))).await.unwrap(),
        vec!["carol"]
    );

    let location = ctx.app.get_location(&bob).await.unwrap();
    assert_eq!(location.user, "bob");
    assert_eq!(location.city, "cambridge");
}

#[tokio::test]
async fn test_opt_in_update_opt_out() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;

    assert_matches!(
        ctx.app.find_nearby(&alice, None).await,
        Err(KinshipError::NotFound(_))
    );

    ctx.app.opt_in_location(&alice, "Cambridge", "MA").await.unwrap();
    assert_matches!(
        ctx.app.opt_in_location(&alice, "Boston", "MA").await,
        Err(KinshipError::AlreadyExists(_))
    );

    let updated = ctx.app.update_location(&alice, "Boston", "MA").await.unwrap();
    assert_eq!(updated.value.city, "Boston");

    ctx.app.opt_out_location(&alice).await.unwrap();
    assert_matches!(ctx.app.get_location(&alice).await, Err(KinshipError::NotFound(_)));
}
