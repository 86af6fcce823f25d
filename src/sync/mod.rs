//! Synchronization layer
//!
//! `App` is the only place that calls more than one concept for a single user
//! action. Each recipe runs its steps in order and awaits each one; a later
//! step never runs if an earlier one fails.
//!
//! Recipes are not transactional. When a primary step has committed and a
//! follow-up step (usually a badge award) fails, the primary effect stays in
//! place and the follow-up's error is returned for the whole action. Callers
//! must treat an error from a recipe as "possibly partially applied".

pub mod accounts;
pub mod comments;
pub mod friends;
pub mod groups;
pub mod maps;
pub mod milestones;
pub mod posts;
pub mod responses;

pub use groups::CreateGroupResponse;
pub use responses::{
    BadgesView, CommentView, FriendRequestView, GroupView, LocationView, PostView, Responses,
};

use crate::concepts::Concepts;
use crate::config::Settings;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct App {
    concepts: Concepts,
    responses: Responses,
}

impl App {
    pub fn new(concepts: Concepts) -> Self {
        let responses = Responses::new(concepts.authing.clone());
        Self { concepts, responses }
    }

    /// Validate `settings`, open the configured store and build the application over it
    pub async fn connect(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(Concepts::connect(settings).await?))
    }

    pub fn concepts(&self) -> &Concepts {
        &self.concepts
    }
}
