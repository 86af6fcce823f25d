//! Grouping concept
//!
//! Owns group documents. Enforces three invariants across records: group names
//! are unique, only the owner may delete a group, and a user appears at most
//! once among owner and members. Membership changes go through the
//! collection's versioned read-modify-write, so concurrent joins and leaves
//! on one group never overwrite each other.

use tracing::debug;

use super::Outcome;
use crate::database::{set_field, DocCollection, Document, Filter, Guarded, Modified, ReadOptions};
use crate::models::{Group, GroupId, UserId};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::helpers::normalize_name;
use crate::utils::logging::log_group_event;

const GROUP_NAME: &str = "groupName";
const GROUP_DESCRIPTION: &str = "groupDescription";

#[derive(Debug, Clone)]
pub struct GroupingConcept {
    groups: DocCollection<Group>,
}

impl GroupingConcept {
    pub fn new(groups: DocCollection<Group>) -> Self {
        Self { groups }
    }

    fn by_name(name: &str) -> Filter {
        Filter::field(GROUP_NAME, name)
    }

    fn clean_name(name: &str) -> Result<String> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(KinshipError::InvalidInput("Group name cannot be empty".to_string()));
        }
        Ok(name)
    }

    /// Create a group with an empty member set
    pub async fn create_group(&self, owner: UserId, name: &str, description: &str) -> Result<Outcome<Document<Group>>> {
        let name = Self::clean_name(name)?;
        let group = Group::new(owner, name.clone(), description.trim().to_string());

        let created = self
            .groups
            .create_one_unless(&Self::by_name(&name), &group)
            .await?
            .ok_or_else(|| KinshipError::AlreadyExists(format!("Group {}", name)))?;

        log_group_event(&name, "created", Some(owner.to_string().as_str()), None);
        Ok(Outcome::new("Group successfully created!", created))
    }

    /// Add `user` to the members of the named group
    pub async fn join_group(&self, user: UserId, name: &str) -> Result<Outcome<Document<Group>>> {
        let name = normalize_name(name);
        let modified = self
            .groups
            .modify_one(&Self::by_name(&name), |group| {
                if group.includes(user) {
                    return Err(KinshipError::AlreadyMember {
                        user: user.to_string(),
                        group: group.group_name.clone(),
                    });
                }
                group.group_members.push(user);
                Ok(true)
            })
            .await?;

        match modified {
            Modified::Missing => Err(KinshipError::NotFound(format!("Group {}", name))),
            Modified::Updated(group) | Modified::Unchanged(group) => {
                log_group_event(&name, "joined", Some(user.to_string().as_str()), None);
                Ok(Outcome::new("Successfully joined group!", group))
            }
        }
    }

    /// Remove the first occurrence of `user` from the members of the named group
    pub async fn leave_group(&self, user: UserId, name: &str) -> Result<Outcome<Document<Group>>> {
        let name = normalize_name(name);
        let modified = self
            .groups
            .modify_one(&Self::by_name(&name), |group| {
                let position = group
                    .group_members
                    .iter()
                    .position(|member| *member == user)
                    .ok_or_else(|| {
                        KinshipError::NotFound(format!(
                            "Membership of user {} in group {}",
                            user, group.group_name
                        ))
                    })?;
                group.group_members.remove(position);
                Ok(true)
            })
            .await?;

        match modified {
            Modified::Missing => Err(KinshipError::NotFound(format!("Group {}", name))),
            Modified::Updated(group) | Modified::Unchanged(group) => {
                log_group_event(&name, "left", Some(user.to_string().as_str()), None);
                Ok(Outcome::new("Successfully left group!", group))
            }
        }
    }

    /// Delete the named group. Only its owner may; remaining members are not checked.
    pub async fn delete_group(&self, owner: UserId, name: &str) -> Result<Outcome<()>> {
        let name = normalize_name(name);
        let group = self
            .groups
            .read_one(&Self::by_name(&name))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Group {}", name)))?;

        if !group.body.is_owner(owner) {
            return Err(KinshipError::NotOwner {
                user: owner.to_string(),
                group: name,
            });
        }

        if !self.groups.delete_one(&Filter::by_id(group.id)).await? {
            return Err(KinshipError::NotFound(format!("Group {}", name)));
        }

        log_group_event(&name, "deleted", Some(owner.to_string().as_str()), None);
        Ok(Outcome::new("Group successfully deleted!", ()))
    }

    /// Rename a group. Ownership is the caller's check; name uniqueness is enforced here.
    pub async fn edit_group_name(&self, id: GroupId, name: &str) -> Result<Outcome<Document<Group>>> {
        let name = Self::clean_name(name)?;
        let updated = self
            .groups
            .partial_update_one_unless(&Filter::by_id(id), set_field(GROUP_NAME, &name)?, Self::by_name(&name))
            .await?;

        match updated {
            Guarded::Updated(group) => {
                log_group_event(&name, "renamed", None, Some(id.to_string().as_str()));
                Ok(Outcome::new("Group name successfully updated!", group))
            }
            Guarded::Missing => Err(KinshipError::NotFound(format!("Group with id {}", id))),
            Guarded::Conflict => Err(KinshipError::AlreadyExists(format!("Group {}", name))),
        }
    }

    /// Replace a group's description. Ownership is the caller's check.
    pub async fn edit_group_description(&self, id: GroupId, description: &str) -> Result<Outcome<Document<Group>>> {
        let updated = self
            .groups
            .partial_update_one(&Filter::by_id(id), set_field(GROUP_DESCRIPTION, description.trim())?)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Group with id {}", id)))?;

        debug!(group_id = %id, "Group description updated");
        Ok(Outcome::new("Group description successfully updated!", updated))
    }

    pub async fn assert_is_group_owner(&self, id: GroupId, user: UserId) -> Result<()> {
        let group = self
            .groups
            .read_one(&Filter::by_id(id))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Group with id {}", id)))?;

        if !group.body.is_owner(user) {
            return Err(KinshipError::NotOwner {
                user: user.to_string(),
                group: group.body.group_name,
            });
        }
        Ok(())
    }

    pub async fn get_group(&self, name: &str) -> Result<Document<Group>> {
        let name = normalize_name(name);
        self.groups
            .read_one(&Self::by_name(&name))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Group {}", name)))
    }

    pub async fn get_all_groups(&self) -> Result<Vec<Document<Group>>> {
        self.groups.read_many(&Filter::all(), &ReadOptions::default()).await
    }

    /// Groups `user` owns or belongs to
    pub async fn get_user_groups(&self, user: UserId) -> Result<Vec<Document<Group>>> {
        let groups = self.get_all_groups().await?;
        Ok(groups.into_iter().filter(|group| group.body.includes(user)).collect())
    }
}
