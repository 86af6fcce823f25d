//! User model

use serde::{Deserialize, Serialize};

use super::{DocId, UserId};
use crate::database::Document;

/// Stored account; `password` holds an argon2 PHC string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

/// Account as returned to callers, without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
}

impl From<Document<User>> for UserView {
    fn from(doc: Document<User>) -> Self {
        Self {
            id: doc.id,
            username: doc.body.username,
        }
    }
}

impl UserView {
    /// Placeholder for an id whose account no longer exists
    pub fn deleted(id: DocId) -> Self {
        Self {
            id,
            username: "DELETED_USER".to_string(),
        }
    }
}
