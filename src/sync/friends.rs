//! Friend recipes; the other party is always named by username

use super::{App, FriendRequestView};
use crate::concepts::{Outcome, Session};
use crate::models::{Badge, UserId};
use crate::utils::errors::Result;
use crate::utils::helpers::join_messages;

impl App {
    async fn user_id(&self, username: &str) -> Result<UserId> {
        Ok(self.concepts.authing.get_user_by_username(username).await?.id)
    }

    /// Usernames of the session user's friends
    pub async fn get_friends(&self, session: &Session) -> Result<Vec<String>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let friends = self.concepts.friending.get_friends(user).await?;
        self.responses.usernames(&friends).await
    }

    pub async fn remove_friend(&self, session: &Session, friend: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let friend = self.user_id(friend).await?;
        self.concepts.friending.remove_friend(user, friend).await
    }

    pub async fn get_friend_requests(&self, session: &Session) -> Result<Vec<FriendRequestView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let requests = self.concepts.friending.get_requests(user).await?;
        self.responses.friend_requests(requests).await
    }

    pub async fn send_friend_request(&self, session: &Session, to: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let to = self.user_id(to).await?;
        let sent = self.concepts.friending.send_request(user, to).await?;
        Ok(Outcome::new(sent.msg, ()))
    }

    pub async fn remove_friend_request(&self, session: &Session, to: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let to = self.user_id(to).await?;
        self.concepts.friending.remove_request(user, to).await
    }

    /// Accept a request sent by `from`, then award "Branching Out" to both
    /// users. The friendship stays if either award fails.
    pub async fn accept_friend_request(&self, session: &Session, from: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let from = self.user_id(from).await?;
        let accepted = self.concepts.friending.accept_request(from, user).await?;

        let awarded = self.award_if_missing(user, Badge::BranchingOut).await?;
        self.award_if_missing(from, Badge::BranchingOut).await?;

        Ok(Outcome::new(
            join_messages([Some(accepted.msg), awarded].into_iter().flatten()),
            (),
        ))
    }

    pub async fn reject_friend_request(&self, session: &Session, from: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let from = self.user_id(from).await?;
        self.concepts.friending.reject_request(from, user).await
    }
}
