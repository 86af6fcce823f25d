//! Test data helpers for registering users and producing content

use kinship::models::{PostId, UserView};
use kinship::{App, Session};

pub const TEST_PASSWORD: &str = "password123";

/// Register `username` without logging in
pub async fn register(app: &App, username: &str) -> UserView {
    app.create_user(&Session::new(), username, TEST_PASSWORD)
        .await
        .expect("registration succeeds")
        .value
}

/// Register and log in through the login recipe
pub async fn register_and_login(app: &App, username: &str) -> (Session, UserView) {
    let user = register(app, username).await;
    let mut session = Session::new();
    app.login(&mut session, username, TEST_PASSWORD)
        .await
        .expect("login succeeds");
    (session, user)
}

/// Create a post as the session user and return its id
pub async fn post_as(app: &App, session: &Session, content: &str) -> PostId {
    app.create_post(session, content, None)
        .await
        .expect("post is created")
        .value
        .id
}

/// Post and comment once, which earns "Post Superstar" and "Comment Guru"
pub async fn earn_group_prerequisites(app: &App, session: &Session) {
    let post = post_as(app, session, "Trail report: muddy but fine").await;
    app.create_comment(session, "Thanks for the update", post)
        .await
        .expect("comment is created");
}
