//! Opted-in user location

use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub user: UserId,
    pub city: String,
    pub state: String,
}
