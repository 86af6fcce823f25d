//! Badge recipes and the award step shared by other recipes

use tracing::debug;

use super::{App, BadgesView};
use crate::concepts::Session;
use crate::models::{Badge, UserId};
use crate::utils::errors::Result;

impl App {
    /// Award `badge` to `user` unless already earned, returning the award message.
    ///
    /// Users without a badge record (they have not logged in since
    /// registering) are skipped rather than failed.
    pub(crate) async fn award_if_missing(&self, user: UserId, badge: Badge) -> Result<Option<String>> {
        let milestoning = &self.concepts.milestoning;
        match milestoning.get_badges(user).await? {
            None => {
                debug!(user_id = %user, badge = %badge, "No badge record, award skipped");
                Ok(None)
            }
            Some(record) if record.body.has(badge) => Ok(None),
            Some(_) => Ok(milestoning
                .receive_badge(user, badge)
                .await?
                .map(|outcome| outcome.msg)),
        }
    }

    /// Badge record of the session user, `None` before their first login
    pub async fn get_badges(&self, session: &Session) -> Result<Option<BadgesView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        match self.concepts.milestoning.get_badges(user).await? {
            Some(record) => Ok(Some(self.responses.badges(record).await?)),
            None => Ok(None),
        }
    }

    /// Badge record of any user by username
    pub async fn get_user_badges(&self, username: &str) -> Result<Option<BadgesView>> {
        let user = self.concepts.authing.get_user_by_username(username).await?;
        match self.concepts.milestoning.get_badges(user.id).await? {
            Some(record) => Ok(Some(self.responses.badges(record).await?)),
            None => Ok(None),
        }
    }
}
