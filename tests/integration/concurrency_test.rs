//! Concurrent recipes on shared records
//!
//! Runs on a multi-threaded runtime so requests interleave at every store call.

use futures::future::join_all;
use kinship::database::{DocumentStore, Filter, ReadOptions};
use kinship::models::{Badge, DocId};
use kinship::{KinshipError, Session};

use crate::helpers::{earn_group_prerequisites, register, register_and_login, TestContext, TEST_PASSWORD};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_keep_every_member() {
    let ctx = TestContext::new();
    let (alice, _) = register_and_login(&ctx.app, "alice").await;
    earn_group_prerequisites(&ctx.app, &alice).await;
    ctx.app.create_group(&alice, "Hikers", "desc").await.unwrap();

    let mut sessions = Vec::new();
    for n in 0..16 {
        let user = register(&ctx.app, &format!("hiker{}", n)).await;
        sessions.push(ctx.session_for(user.id));
    }

    let joins = sessions.iter().map(|session| {
        let app = ctx.app.clone();
        let session = session.clone();
        tokio::spawn(async move { app.join_group(&session, "Hikers").await })
    });
    for joined in join_all(joins).await {
        joined.expect("task completes").expect("join succeeds");
    }

    let group = ctx.concepts().grouping.get_group("Hikers").await.unwrap();
    assert_eq!(group.body.group_members.len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_awards_to_one_user_all_stick() {
    let ctx = TestContext::new();
    let user = DocId::new();
    let milestoning = ctx.concepts().milestoning.clone();
    milestoning.initialize_user_milestones(user).await.unwrap();

    let awards = Badge::ALL.into_iter().map(|badge| {
        let milestoning = milestoning.clone();
        tokio::spawn(async move { milestoning.receive_badge(user, badge).await })
    });
    for awarded in join_all(awards).await {
        assert!(awarded.unwrap().unwrap().is_some());
    }

    let record = milestoning.get_badges(user).await.unwrap().unwrap();
    assert_eq!(record.body.earned(), Badge::ALL.to_vec());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_of_one_name_yield_one_group() {
    let ctx = TestContext::new();
    let grouping = ctx.concepts().grouping.clone();

    let creates = (0..12).map(|_| {
        let grouping = grouping.clone();
        tokio::spawn(async move { grouping.create_group(DocId::new(), "Hikers", "desc").await })
    });
    let results: Vec<_> = join_all(creates)
        .await
        .into_iter()
        .map(|task| task.expect("task completes"))
        .collect();

    let created = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(created, 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(|err| matches!(err, KinshipError::AlreadyExists(_))));
    assert_eq!(grouping.get_all_groups().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_first_logins_both_succeed() {
    let ctx = TestContext::new();

    for round in 0..10 {
        let username = format!("newcomer{}", round);
        let user = register(&ctx.app, &username).await;

        let logins = (0..2).map(|_| {
            let app = ctx.app.clone();
            let username = username.clone();
            tokio::spawn(async move {
                let mut session = Session::new();
                let outcome = app.login(&mut session, &username, TEST_PASSWORD).await;
                (session, outcome)
            })
        });

        let mut reported = 0;
        for login in join_all(logins).await {
            let (session, outcome) = login.expect("task completes");
            let outcome = outcome.expect("login succeeds");
            assert!(outcome.msg.starts_with("Logged in!"));
            assert_eq!(ctx.concepts().sessioning.get_user(&session).unwrap(), user.id);
            if outcome.msg.contains(Badge::GettingStarted.name()) {
                reported += 1;
            }
        }
        assert_eq!(reported, 1);

        let records = ctx
            .store()
            .find_many(
                &ctx.settings.collections.milestones,
                &Filter::field("owner", user.id),
                &ReadOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 1);

        let badges = ctx.app.get_user_badges(&username).await.unwrap().unwrap();
        assert_eq!(badges.earned(), vec![Badge::GettingStarted]);
    }
}
