//! Milestoning concept
//!
//! Tracks which badges each user has earned. A user has at most one badge
//! record, created on registration; flags only ever move from unearned to
//! earned.

use super::Outcome;
use crate::database::{DocCollection, Document, Filter, Modified};
use crate::models::{Badge, BadgeRecord, UserId};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::logging::log_badge_awarded;

#[derive(Debug, Clone)]
pub struct MilestoningConcept {
    records: DocCollection<BadgeRecord>,
}

impl MilestoningConcept {
    pub fn new(records: DocCollection<BadgeRecord>) -> Self {
        Self { records }
    }

    fn by_owner(user: UserId) -> Filter {
        Filter::field("owner", user)
    }

    /// Create the all-unearned record for `user`; fails if one already exists
    pub async fn initialize_user_milestones(&self, user: UserId) -> Result<Outcome<Document<BadgeRecord>>> {
        let record = self
            .records
            .create_one_unless(&Self::by_owner(user), &BadgeRecord::new(user))
            .await?
            .ok_or_else(|| KinshipError::AlreadyExists(format!("Badge record for user {}", user)))?;

        Ok(Outcome::new("Badges initialized!", record))
    }

    /// Mark `badge` earned for `user`.
    ///
    /// Returns `None` when the badge was already earned, in which case nothing
    /// is written. Fails with `NotFound` when the user has no badge record.
    pub async fn receive_badge(&self, user: UserId, badge: Badge) -> Result<Option<Outcome<Document<BadgeRecord>>>> {
        let modified = self
            .records
            .modify_one(&Self::by_owner(user), |record| Ok(record.earn(badge)))
            .await?;

        match modified {
            Modified::Missing => Err(KinshipError::NotFound(format!("Badge record for user {}", user))),
            Modified::Unchanged(_) => Ok(None),
            Modified::Updated(record) => {
                log_badge_awarded(&user.to_string(), badge.name());
                Ok(Some(Outcome::new(format!("Badge earned: {}!", badge), record)))
            }
        }
    }

    pub async fn get_badges(&self, user: UserId) -> Result<Option<Document<BadgeRecord>>> {
        self.records.read_one(&Self::by_owner(user)).await
    }

    /// Which of `required` the user lacks, in the order given.
    /// A user without a record lacks all of them.
    pub async fn missing_badges(&self, user: UserId, required: &[Badge]) -> Result<Vec<Badge>> {
        Ok(match self.get_badges(user).await? {
            Some(record) => record.body.missing(required),
            None => required.to_vec(),
        })
    }

    pub async fn delete_user_milestones(&self, user: UserId) -> Result<Outcome<u64>> {
        let deleted = self.records.delete_many(&Self::by_owner(user)).await?;
        Ok(Outcome::new("Badges deleted!", deleted))
    }
}
