//! Sessioning concept
//!
//! Login state lives in a caller-held `Session` value; issuing and storing
//! the session cookie belongs to the request boundary.

use serde::{Deserialize, Serialize};

use crate::models::UserId;
use crate::utils::errors::{KinshipError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessioningConcept;

impl SessioningConcept {
    pub fn new() -> Self {
        Self
    }

    pub fn start(&self, session: &mut Session, user: UserId) -> Result<()> {
        self.is_logged_out(session)?;
        session.user = Some(user);
        Ok(())
    }

    pub fn end(&self, session: &mut Session) -> Result<()> {
        self.is_logged_in(session)?;
        session.user = None;
        Ok(())
    }

    pub fn get_user(&self, session: &Session) -> Result<UserId> {
        session
            .user
            .ok_or_else(|| KinshipError::NotAllowed("Must be logged in!".to_string()))
    }

    pub fn is_logged_in(&self, session: &Session) -> Result<()> {
        self.get_user(session).map(|_| ())
    }

    pub fn is_logged_out(&self, session: &Session) -> Result<()> {
        match session.user {
            Some(_) => Err(KinshipError::NotAllowed("Must be logged out!".to_string())),
            None => Ok(()),
        }
    }
}
