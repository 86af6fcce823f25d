//! Account and session recipes

use tracing::{debug, info};

use super::App;
use crate::concepts::{Outcome, Session};
use crate::models::{Badge, UserView};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::helpers::join_messages;
use crate::utils::logging::log_user_action;

impl App {
    pub async fn get_session_user(&self, session: &Session) -> Result<UserView> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.authing.get_user_by_id(user).await
    }

    pub async fn get_users(&self, prefix: Option<&str>) -> Result<Vec<UserView>> {
        self.concepts.authing.get_users(prefix).await
    }

    pub async fn get_user(&self, username: &str) -> Result<UserView> {
        self.concepts.authing.get_user_by_username(username).await
    }

    /// Register an account. Badges are set up on first login, not here.
    pub async fn create_user(&self, session: &Session, username: &str, password: &str) -> Result<Outcome<UserView>> {
        self.concepts.sessioning.is_logged_out(session)?;
        let created = self.concepts.authing.create(username, password).await?;
        log_user_action(&created.value.id.to_string(), "registered", Some(created.value.username.as_str()));
        Ok(created)
    }

    /// Authenticate, start the session, and on a first login set up the
    /// user's badges and award "Getting Started".
    ///
    /// Steps: authenticate, start session, read badges, then (first login
    /// only) initialize the record and award the badge. If the last two
    /// fail the session stays started. When a concurrent login initialized
    /// the record first, that login reports the badge and this one does not.
    pub async fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<Outcome<UserView>> {
        let user = self.concepts.authing.authenticate(username, password).await?;
        self.concepts.sessioning.start(session, user.id)?;
        let mut messages = vec!["Logged in!".to_string()];

        let milestoning = &self.concepts.milestoning;
        if milestoning.get_badges(user.id).await?.is_none() {
            // An overlapping first login may create the record between the read and here
            match milestoning.initialize_user_milestones(user.id).await {
                Ok(initialized) => {
                    messages.push(initialized.msg);
                    if let Some(awarded) = milestoning.receive_badge(user.id, Badge::GettingStarted).await? {
                        messages.push(awarded.msg);
                    }
                }
                Err(KinshipError::AlreadyExists(_)) => {
                    debug!(user_id = %user.id, "Badge record created by a concurrent login");
                }
                Err(e) => return Err(e),
            }
        }

        log_user_action(&user.id.to_string(), "logged_in", None);
        Ok(Outcome::new(join_messages(&messages), user))
    }

    pub async fn logout(&self, session: &mut Session) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.sessioning.end(session)?;
        log_user_action(&user.to_string(), "logged_out", None);
        Ok(Outcome::new("Logged out!", ()))
    }

    pub async fn update_username(&self, session: &Session, username: &str) -> Result<Outcome<UserView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.authing.update_username(user, username).await
    }

    pub async fn update_password(&self, session: &Session, current: &str, new: &str) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.authing.update_password(user, current, new).await
    }

    /// End the session, delete the account, then delete its badge record.
    ///
    /// Content the user authored stays and is later shown as `DELETED_USER`.
    pub async fn delete_user(&self, session: &mut Session) -> Result<Outcome<()>> {
        let sessioning = &self.concepts.sessioning;
        let user = sessioning.get_user(session)?;
        sessioning.end(session)?;

        let deleted = self.concepts.authing.delete(user).await?;
        self.concepts.milestoning.delete_user_milestones(user).await?;

        info!(user_id = %user, "Account removed");
        Ok(Outcome::new(deleted.msg, ()))
    }
}
