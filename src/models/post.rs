//! Post model

use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOptions {
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub author: UserId,
    pub content: String,
    #[serde(default)]
    pub options: Option<PostOptions>,
}
