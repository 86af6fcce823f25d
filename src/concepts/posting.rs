//! Posting concept

use serde_json::Map;
use tracing::debug;

use super::Outcome;
use crate::database::{DocCollection, Document, Filter, ReadOptions};
use crate::models::{Post, PostId, PostOptions, UserId};
use crate::utils::errors::{KinshipError, Result};

#[derive(Debug, Clone)]
pub struct PostingConcept {
    posts: DocCollection<Post>,
    max_length: usize,
}

impl PostingConcept {
    pub fn new(posts: DocCollection<Post>, max_length: usize) -> Self {
        Self { posts, max_length }
    }

    fn check_content(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(KinshipError::InvalidInput("Post content cannot be empty".to_string()));
        }
        if content.chars().count() > self.max_length {
            return Err(KinshipError::InvalidInput(format!(
                "Post content exceeds {} characters",
                self.max_length
            )));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        author: UserId,
        content: &str,
        options: Option<PostOptions>,
    ) -> Result<Outcome<Document<Post>>> {
        self.check_content(content)?;
        let post = self
            .posts
            .create_one(&Post {
                author,
                content: content.to_string(),
                options,
            })
            .await?;

        debug!(post_id = %post.id, author = %author, "Post created");
        Ok(Outcome::new("Post successfully created!", post))
    }

    /// Every post, most recently updated first
    pub async fn get_posts(&self) -> Result<Vec<Document<Post>>> {
        self.posts
            .read_many(&Filter::all(), &ReadOptions::newest_updated_first())
            .await
    }

    pub async fn get_by_author(&self, author: UserId) -> Result<Vec<Document<Post>>> {
        self.posts
            .read_many(&Filter::field("author", author), &ReadOptions::newest_updated_first())
            .await
    }

    pub async fn get_post(&self, id: PostId) -> Result<Document<Post>> {
        self.posts
            .read_one(&Filter::by_id(id))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Post {}", id)))
    }

    /// Patch the given fields; `None` leaves a field as it is
    pub async fn update(
        &self,
        id: PostId,
        content: Option<&str>,
        options: Option<PostOptions>,
    ) -> Result<Outcome<Document<Post>>> {
        let mut patch = Map::new();
        if let Some(content) = content {
            self.check_content(content)?;
            patch.insert("content".to_string(), content.into());
        }
        if let Some(options) = options {
            patch.insert("options".to_string(), serde_json::to_value(options)?);
        }

        let post = self
            .posts
            .partial_update_one(&Filter::by_id(id), patch)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Post {}", id)))?;
        Ok(Outcome::new("Post successfully updated!", post))
    }

    pub async fn delete(&self, id: PostId) -> Result<Outcome<()>> {
        if !self.posts.delete_one(&Filter::by_id(id)).await? {
            return Err(KinshipError::NotFound(format!("Post {}", id)));
        }
        Ok(Outcome::new("Post deleted successfully!", ()))
    }

    pub async fn assert_author_is_user(&self, id: PostId, user: UserId) -> Result<()> {
        let post = self.get_post(id).await?;
        if post.body.author != user {
            return Err(KinshipError::NotAllowed(format!(
                "{} is not the author of post {}!",
                user, id
            )));
        }
        Ok(())
    }
}
