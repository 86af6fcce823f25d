//! Data models module
//!
//! This module contains the persisted bodies each concept stores. Identifiers
//! are opaque store ids; concepts never look inside another concept's records.

pub mod badge;
pub mod comment;
pub mod friend;
pub mod group;
pub mod location;
pub mod post;
pub mod user;

pub use crate::database::DocId;

pub type UserId = DocId;
pub type PostId = DocId;
pub type CommentId = DocId;
pub type GroupId = DocId;

// Re-export commonly used models
pub use badge::{Badge, BadgeRecord};
pub use comment::Comment;
pub use friend::{FriendRequest, Friendship, RequestStatus};
pub use group::Group;
pub use location::Location;
pub use post::{Post, PostOptions};
pub use user::{User, UserView};
