//! Post recipes

use super::{App, PostView};
use crate::concepts::{Outcome, Session};
use crate::models::{Badge, PostId, PostOptions};
use crate::utils::errors::Result;
use crate::utils::helpers::join_messages;

impl App {
    /// All posts, or only those by `author`, newest activity first
    pub async fn get_posts(&self, author: Option<&str>) -> Result<Vec<PostView>> {
        let posts = match author {
            Some(username) => {
                let author = self.concepts.authing.get_user_by_username(username).await?;
                self.concepts.posting.get_by_author(author.id).await?
            }
            None => self.concepts.posting.get_posts().await?,
        };
        self.responses.posts(posts).await
    }

    /// Create a post, then award "Post Superstar" if the author lacks it.
    /// A failed award leaves the post in place.
    pub async fn create_post(
        &self,
        session: &Session,
        content: &str,
        options: Option<PostOptions>,
    ) -> Result<Outcome<PostView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let created = self.concepts.posting.create(user, content, options).await?;
        let awarded = self.award_if_missing(user, Badge::PostSuperstar).await?;

        let post = self.responses.post(created.value).await?;
        Ok(Outcome::new(join_messages([Some(created.msg), awarded].into_iter().flatten()), post))
    }

    pub async fn update_post(
        &self,
        session: &Session,
        id: PostId,
        content: Option<&str>,
        options: Option<PostOptions>,
    ) -> Result<Outcome<PostView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.posting.assert_author_is_user(id, user).await?;
        let updated = self.concepts.posting.update(id, content, options).await?;
        Ok(Outcome::new(updated.msg, self.responses.post(updated.value).await?))
    }

    pub async fn delete_post(&self, session: &Session, id: PostId) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.posting.assert_author_is_user(id, user).await?;
        self.concepts.posting.delete(id).await
    }
}
