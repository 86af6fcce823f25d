//! Group model

use serde::{Deserialize, Serialize};

use super::UserId;

/// A user group. The owner is an implicit member and never appears in
/// `group_members`; `group_name` is unique among stored groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_name: String,
    pub group_description: String,
    pub group_owner: UserId,
    #[serde(default)]
    pub group_members: Vec<UserId>,
}

impl Group {
    pub fn new(group_owner: UserId, group_name: String, group_description: String) -> Self {
        Self {
            group_name,
            group_description,
            group_owner,
            group_members: Vec::new(),
        }
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.group_owner == user
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.group_members.contains(&user)
    }

    /// Owner or listed member
    pub fn includes(&self, user: UserId) -> bool {
        self.is_owner(user) || self.is_member(user)
    }
}
