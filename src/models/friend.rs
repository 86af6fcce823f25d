//! Friendship and friend request models

use serde::{Deserialize, Serialize};

use super::UserId;

/// An undirected friendship, stored once with `user1 < user2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    pub user1: UserId,
    pub user2: UserId,
}

impl Friendship {
    pub fn between(a: UserId, b: UserId) -> Self {
        Self {
            user1: a.min(b),
            user2: a.max(b),
        }
    }

    pub fn other(&self, user: UserId) -> Option<UserId> {
        if self.user1 == user {
            Some(self.user2)
        } else if self.user2 == user {
            Some(self.user1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub from: UserId,
    pub to: UserId,
    pub status: RequestStatus,
}
