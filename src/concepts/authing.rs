//! Authing concept
//!
//! Accounts with unique usernames. Passwords are stored as argon2id PHC
//! strings and never leave this module.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use futures::future::try_join_all;
use tracing::{debug, info};

use super::Outcome;
use crate::database::{set_field, DocCollection, Document, Filter, Guarded, ReadOptions};
use crate::models::{User, UserId, UserView};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::helpers::normalize_name;

const USERNAME: &str = "username";
const INCORRECT_CREDENTIALS: &str = "Username or password is incorrect.";

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| KinshipError::Internal(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| KinshipError::Internal(format!("Invalid password hash format: {e}")))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[derive(Debug, Clone)]
pub struct AuthingConcept {
    users: DocCollection<User>,
    min_password_length: usize,
}

impl AuthingConcept {
    pub fn new(users: DocCollection<User>, min_password_length: usize) -> Self {
        Self {
            users,
            min_password_length,
        }
    }

    fn check_credentials(&self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(KinshipError::InvalidInput("Username cannot be empty".to_string()));
        }
        if password.chars().count() < self.min_password_length {
            return Err(KinshipError::InvalidInput(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }
        Ok(())
    }

    pub async fn create(&self, username: &str, password: &str) -> Result<Outcome<UserView>> {
        let username = normalize_name(username);
        self.check_credentials(&username, password)?;

        let user = User {
            username: username.clone(),
            password: hash_password(password)?,
        };
        let created = self
            .users
            .create_one_unless(&Filter::field(USERNAME, username.as_str()), &user)
            .await?
            .ok_or_else(|| KinshipError::AlreadyExists(format!("Username {}", username)))?;

        info!(user_id = %created.id, username = %username, "User created");
        Ok(Outcome::new("Created user successfully!", created.into()))
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserView> {
        let user = self
            .users
            .read_one(&Filter::field(USERNAME, normalize_name(username)))
            .await?
            .ok_or_else(|| KinshipError::Authentication(INCORRECT_CREDENTIALS.to_string()))?;

        if !verify_password(password, &user.body.password)? {
            return Err(KinshipError::Authentication(INCORRECT_CREDENTIALS.to_string()));
        }
        Ok(user.into())
    }

    async fn read_user(&self, id: UserId) -> Result<Document<User>> {
        self.users
            .read_one(&Filter::by_id(id))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("User with id {}", id)))
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<UserView> {
        Ok(self.read_user(id).await?.into())
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserView> {
        let username = normalize_name(username);
        self.users
            .read_one(&Filter::field(USERNAME, username.as_str()))
            .await?
            .map(UserView::from)
            .ok_or_else(|| KinshipError::NotFound(format!("User with username {}", username)))
    }

    /// All accounts, or those whose username starts with `prefix`
    pub async fn get_users(&self, prefix: Option<&str>) -> Result<Vec<UserView>> {
        let users = self.users.read_many(&Filter::all(), &ReadOptions::default()).await?;
        Ok(users
            .into_iter()
            .filter(|user| prefix.map_or(true, |p| user.body.username.starts_with(p)))
            .map(UserView::from)
            .collect())
    }

    /// Usernames for `ids`, in order; deleted accounts map to a placeholder
    pub async fn ids_to_usernames(&self, ids: &[UserId]) -> Result<Vec<String>> {
        let lookups = ids.iter().map(|&id| async move {
            let found = self.users.read_one(&Filter::by_id(id)).await?;
            Ok::<_, KinshipError>(match found {
                Some(user) => user.body.username,
                None => UserView::deleted(id).username,
            })
        });
        try_join_all(lookups).await
    }

    pub async fn update_username(&self, id: UserId, username: &str) -> Result<Outcome<UserView>> {
        let username = normalize_name(username);
        if username.is_empty() {
            return Err(KinshipError::InvalidInput("Username cannot be empty".to_string()));
        }

        let updated = self
            .users
            .partial_update_one_unless(
                &Filter::by_id(id),
                set_field(USERNAME, &username)?,
                Filter::field(USERNAME, username.as_str()),
            )
            .await?;

        match updated {
            Guarded::Updated(user) => {
                debug!(user_id = %id, username = %username, "Username updated");
                Ok(Outcome::new("Updated username successfully!", user.into()))
            }
            Guarded::Missing => Err(KinshipError::NotFound(format!("User with id {}", id))),
            Guarded::Conflict => Err(KinshipError::AlreadyExists(format!("Username {}", username))),
        }
    }

    pub async fn update_password(&self, id: UserId, current: &str, new: &str) -> Result<Outcome<()>> {
        let user = self.read_user(id).await?;
        if !verify_password(current, &user.body.password)? {
            return Err(KinshipError::Authentication(
                "The given current password is wrong!".to_string(),
            ));
        }
        self.check_credentials(&user.body.username, new)?;

        self.users
            .partial_update_one(&Filter::by_id(id), set_field("password", hash_password(new)?)?)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("User with id {}", id)))?;

        debug!(user_id = %id, "Password updated");
        Ok(Outcome::new("Updated password successfully!", ()))
    }

    pub async fn delete(&self, id: UserId) -> Result<Outcome<()>> {
        if !self.users.delete_one(&Filter::by_id(id)).await? {
            return Err(KinshipError::NotFound(format!("User with id {}", id)));
        }
        info!(user_id = %id, "User deleted");
        Ok(Outcome::new("User deleted!", ()))
    }
}
