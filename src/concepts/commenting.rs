//! Commenting concept

use tracing::debug;

use super::Outcome;
use crate::database::{set_field, DocCollection, Document, Filter, ReadOptions};
use crate::models::{Comment, CommentId, PostId, UserId};
use crate::utils::errors::{KinshipError, Result};

#[derive(Debug, Clone)]
pub struct CommentingConcept {
    comments: DocCollection<Comment>,
}

impl CommentingConcept {
    pub fn new(comments: DocCollection<Comment>) -> Self {
        Self { comments }
    }

    fn check_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(KinshipError::InvalidInput("Comment content cannot be empty".to_string()));
        }
        Ok(())
    }

    pub async fn add_comment(&self, author: UserId, content: &str, post: PostId) -> Result<Outcome<Document<Comment>>> {
        Self::check_content(content)?;
        let comment = self
            .comments
            .create_one(&Comment {
                author,
                content: content.to_string(),
                post,
            })
            .await?;

        debug!(comment_id = %comment.id, post_id = %post, author = %author, "Comment created");
        Ok(Outcome::new("Comment successfully created!", comment))
    }

    pub async fn get_comments(&self) -> Result<Vec<Document<Comment>>> {
        self.comments
            .read_many(&Filter::all(), &ReadOptions::newest_updated_first())
            .await
    }

    pub async fn get_by_author(&self, author: UserId) -> Result<Vec<Document<Comment>>> {
        self.comments
            .read_many(&Filter::field("author", author), &ReadOptions::newest_updated_first())
            .await
    }

    pub async fn get_by_post(&self, post: PostId) -> Result<Vec<Document<Comment>>> {
        self.comments
            .read_many(&Filter::field("post", post), &ReadOptions::newest_updated_first())
            .await
    }

    pub async fn update(&self, id: CommentId, content: &str) -> Result<Outcome<Document<Comment>>> {
        Self::check_content(content)?;
        let comment = self
            .comments
            .partial_update_one(&Filter::by_id(id), set_field("content", content)?)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Comment {}", id)))?;
        Ok(Outcome::new("Comment successfully updated!", comment))
    }

    pub async fn delete(&self, id: CommentId) -> Result<Outcome<()>> {
        if !self.comments.delete_one(&Filter::by_id(id)).await? {
            return Err(KinshipError::NotFound(format!("Comment {}", id)));
        }
        Ok(Outcome::new("Comment deleted successfully!", ()))
    }

    pub async fn assert_author_is_user(&self, id: CommentId, user: UserId) -> Result<()> {
        let comment = self
            .comments
            .read_one(&Filter::by_id(id))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Comment {}", id)))?;
        if comment.body.author != user {
            return Err(KinshipError::NotAllowed(format!(
                "{} is not the author of comment {}!",
                user, id
            )));
        }
        Ok(())
    }
}
