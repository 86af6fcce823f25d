//! Group recipes
//!
//! Group creation is gated on badges: the creator must hold every badge in
//! `Badge::GROUP_PREREQUISITES`. Joining awards "Building Community".

use serde::Serialize;

use super::{App, GroupView};
use crate::concepts::{Outcome, Session};
use crate::models::{Badge, GroupId};
use crate::utils::errors::Result;
use crate::utils::helpers::join_messages;

/// Result of the gated create-group recipe. Exactly one of `group` and
/// `missing_badges` is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupResponse {
    pub msg: String,
    pub group: Option<GroupView>,
    pub missing_badges: Vec<Badge>,
}

impl CreateGroupResponse {
    pub fn is_created(&self) -> bool {
        self.group.is_some()
    }
}

fn missing_badges_message(missing: &[Badge]) -> String {
    let names: Vec<&str> = missing.iter().map(|badge| badge.name()).collect();
    format!(
        "You are unable to create a group because you are missing the following badges: {}",
        names.join(", ")
    )
}

impl App {
    pub async fn get_groups(&self) -> Result<Vec<GroupView>> {
        let groups = self.concepts.grouping.get_all_groups().await?;
        self.responses.groups(groups).await
    }

    /// Groups the named user owns or belongs to
    pub async fn get_user_groups(&self, username: &str) -> Result<Vec<GroupView>> {
        let user = self.concepts.authing.get_user_by_username(username).await?;
        let groups = self.concepts.grouping.get_user_groups(user.id).await?;
        self.responses.groups(groups).await
    }

    /// Create a group if the session user holds every prerequisite badge.
    ///
    /// Without them no group is written and the response lists the missing
    /// badges; this is a successful result, not an error.
    pub async fn create_group(&self, session: &Session, name: &str, description: &str) -> Result<CreateGroupResponse> {
        let user = self.concepts.sessioning.get_user(session)?;
        let missing = self
            .concepts
            .milestoning
            .missing_badges(user, &Badge::GROUP_PREREQUISITES)
            .await?;

        if !missing.is_empty() {
            return Ok(CreateGroupResponse {
                msg: missing_badges_message(&missing),
                group: None,
                missing_badges: missing,
            });
        }

        let created = self.concepts.grouping.create_group(user, name, description).await?;
        Ok(CreateGroupResponse {
            msg: created.msg,
            group: Some(self.responses.group(created.value).await?),
            missing_badges: Vec::new(),
        })
    }

    /// Join a group, then award "Building Community" if the user lacks it.
    /// A failed award leaves the membership in place.
    pub async fn join_group(&self, session: &Session, name: &str) -> Result<Outcome<GroupView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let joined = self.concepts.grouping.join_group(user, name).await?;
        let awarded = self.award_if_missing(user, Badge::BuildingCommunity).await?;

        let group = self.responses.group(joined.value).await?;
        Ok(Outcome::new(join_messages([Some(joined.msg), awarded].into_iter().flatten()), group))
    }

    pub async fn leave_group(&self, session: &Session, name: &str) -> Result<Outcome<GroupView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let left = self.concepts.grouping.leave_group(user, name).await?;
        Ok(Outcome::new(left.msg, self.responses.group(left.value).await?))
    }

    pub async fn delete_group(&self, session: &Session, name: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.grouping.delete_group(user, name).await
    }

    pub async fn edit_group_name(&self, session: &Session, id: GroupId, name: &str) -> Result<Outcome<GroupView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.grouping.assert_is_group_owner(id, user).await?;
        let renamed = self.concepts.grouping.edit_group_name(id, name).await?;
        Ok(Outcome::new(renamed.msg, self.responses.group(renamed.value).await?))
    }

    pub async fn edit_group_description(
        &self,
        session: &Session,
        id: GroupId,
        description: &str,
    ) -> Result<Outcome<GroupView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.grouping.assert_is_group_owner(id, user).await?;
        let edited = self.concepts.grouping.edit_group_description(id, description).await?;
        Ok(Outcome::new(edited.msg, self.responses.group(edited.value).await?))
    }
}
