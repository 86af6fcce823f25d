//! Friending concept
//!
//! Directed friend requests and undirected friendships. A friendship is stored
//! once per pair with the smaller id first, so one filter covers both
//! directions.

use tracing::debug;

use super::Outcome;
use crate::database::{DocCollection, Document, Filter, Modified, ReadOptions};
use crate::models::{FriendRequest, Friendship, RequestStatus, UserId};
use crate::utils::errors::{KinshipError, Result};

#[derive(Debug, Clone)]
pub struct FriendingConcept {
    friends: DocCollection<Friendship>,
    requests: DocCollection<FriendRequest>,
}

fn pending(from: UserId, to: UserId) -> Filter {
    Filter::field("from", from)
        .and("to", to)
        .and("status", "pending")
}

fn friendship(a: UserId, b: UserId) -> Filter {
    let pair = Friendship::between(a, b);
    Filter::field("user1", pair.user1).and("user2", pair.user2)
}

impl FriendingConcept {
    pub fn new(friends: DocCollection<Friendship>, requests: DocCollection<FriendRequest>) -> Self {
        Self { friends, requests }
    }

    async fn find_friendship(&self, a: UserId, b: UserId) -> Result<Option<Document<Friendship>>> {
        self.friends.read_one(&friendship(a, b)).await
    }

    pub async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool> {
        Ok(self.find_friendship(a, b).await?.is_some())
    }

    pub async fn send_request(&self, from: UserId, to: UserId) -> Result<Outcome<Document<FriendRequest>>> {
        if from == to {
            return Err(KinshipError::NotAllowed(
                "Cannot send a friend request to yourself!".to_string(),
            ));
        }
        if self.are_friends(from, to).await? {
            return Err(KinshipError::AlreadyExists(format!("Friendship between {} and {}", from, to)));
        }
        if self.requests.read_one(&pending(to, from)).await?.is_some() {
            return Err(KinshipError::AlreadyExists(format!("Friend request between {} and {}", to, from)));
        }

        let request = FriendRequest {
            from,
            to,
            status: RequestStatus::Pending,
        };
        let created = self
            .requests
            .create_one_unless(&pending(from, to), &request)
            .await?
            .ok_or_else(|| KinshipError::AlreadyExists(format!("Friend request between {} and {}", from, to)))?;

        debug!(from = %from, to = %to, "Friend request sent");
        Ok(Outcome::new("Sent request!", created))
    }

    /// Withdraw a pending request
    pub async fn remove_request(&self, from: UserId, to: UserId) -> Result<Outcome<()>> {
        if !self.requests.delete_one(&pending(from, to)).await? {
            return Err(KinshipError::NotFound(format!("Friend request from {} to {}", from, to)));
        }
        Ok(Outcome::new("Removed request!", ()))
    }

    async fn resolve_request(&self, from: UserId, to: UserId, status: RequestStatus) -> Result<Document<FriendRequest>> {
        let modified = self
            .requests
            .modify_one(&pending(from, to), |request| {
                request.status = status;
                Ok(true)
            })
            .await?;

        match modified {
            Modified::Missing => Err(KinshipError::NotFound(format!("Friend request from {} to {}", from, to))),
            Modified::Updated(request) | Modified::Unchanged(request) => Ok(request),
        }
    }

    /// Accept a pending request and record the friendship.
    ///
    /// Fails with `AlreadyExists`, leaving the request pending, when the two
    /// users are already friends. If a concurrent accept of the opposite
    /// request wins the insert, its friendship is returned.
    pub async fn accept_request(&self, from: UserId, to: UserId) -> Result<Outcome<Document<Friendship>>> {
        if self.are_friends(from, to).await? {
            return Err(KinshipError::AlreadyExists(format!("Friendship between {} and {}", from, to)));
        }
        self.resolve_request(from, to, RequestStatus::Accepted).await?;

        let pair = friendship(from, to);
        let created = match self.friends.create_one_unless(&pair, &Friendship::between(from, to)).await? {
            Some(created) => created,
            None => self
                .friends
                .read_one(&pair)
                .await?
                .ok_or_else(|| KinshipError::Conflict(format!("Friendship between {} and {}", from, to)))?,
        };

        debug!(from = %from, to = %to, "Friend request accepted");
        Ok(Outcome::new("Accepted request!", created))
    }

    pub async fn reject_request(&self, from: UserId, to: UserId) -> Result<Outcome<()>> {
        self.resolve_request(from, to, RequestStatus::Rejected).await?;
        Ok(Outcome::new("Rejected request!", ()))
    }

    /// Requests sent or received by `user`, oldest first
    pub async fn get_requests(&self, user: UserId) -> Result<Vec<Document<FriendRequest>>> {
        let mut requests = self
            .requests
            .read_many(&Filter::field("from", user), &ReadOptions::default())
            .await?;
        requests.extend(
            self.requests
                .read_many(&Filter::field("to", user), &ReadOptions::default())
                .await?,
        );
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }

    pub async fn get_friends(&self, user: UserId) -> Result<Vec<UserId>> {
        let mut friendships = self
            .friends
            .read_many(&Filter::field("user1", user), &ReadOptions::default())
            .await?;
        friendships.extend(
            self.friends
                .read_many(&Filter::field("user2", user), &ReadOptions::default())
                .await?,
        );
        Ok(friendships
            .iter()
            .filter_map(|friendship| friendship.body.other(user))
            .collect())
    }

    pub async fn remove_friend(&self, user: UserId, friend: UserId) -> Result<Outcome<()>> {
        let found = self
            .find_friendship(user, friend)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Friendship between {} and {}", user, friend)))?;
        if !self.friends.delete_one(&Filter::by_id(found.id)).await? {
            return Err(KinshipError::NotFound(format!("Friendship between {} and {}", user, friend)));
        }
        Ok(Outcome::new("Unfriended!", ()))
    }
}
