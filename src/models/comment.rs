//! Comment model

use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: UserId,
    pub content: String,
    pub post: PostId,
}
