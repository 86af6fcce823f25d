//! Comment recipes

use super::{App, CommentView};
use crate::concepts::{Outcome, Session};
use crate::models::{Badge, CommentId, PostId};
use crate::utils::errors::Result;
use crate::utils::helpers::join_messages;

impl App {
    /// All comments, or only those by `author`
    pub async fn get_comments(&self, author: Option<&str>) -> Result<Vec<CommentView>> {
        let comments = match author {
            Some(username) => {
                let author = self.concepts.authing.get_user_by_username(username).await?;
                self.concepts.commenting.get_by_author(author.id).await?
            }
            None => self.concepts.commenting.get_comments().await?,
        };
        self.responses.comments(comments).await
    }

    pub async fn get_post_comments(&self, post: PostId) -> Result<Vec<CommentView>> {
        let comments = self.concepts.commenting.get_by_post(post).await?;
        self.responses.comments(comments).await
    }

    /// Comment on an existing post, then award "Comment Guru" if the author
    /// lacks it. A failed award leaves the comment in place.
    pub async fn create_comment(&self, session: &Session, content: &str, post: PostId) -> Result<Outcome<CommentView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.posting.get_post(post).await?;
        let created = self.concepts.commenting.add_comment(user, content, post).await?;
        let awarded = self.award_if_missing(user, Badge::CommentGuru).await?;

        let comment = self.responses.comment(created.value).await?;
        Ok(Outcome::new(join_messages([Some(created.msg), awarded].into_iter().flatten()), comment))
    }

    pub async fn update_comment(&self, session: &Session, id: CommentId, content: &str) -> Result<Outcome<CommentView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.commenting.assert_author_is_user(id, user).await?;
        let updated = self.concepts.commenting.update(id, content).await?;
        Ok(Outcome::new(updated.msg, self.responses.comment(updated.value).await?))
    }

    pub async fn delete_comment(&self, session: &Session, id: CommentId) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.commenting.assert_author_is_user(id, user).await?;
        self.concepts.commenting.delete(id).await
    }
}
