//! Kinship social backend
//!
//! Independent domain concepts (accounts, sessions, posts, comments, friends,
//! groups, badges, locations), each persisted in its own document collection,
//! and a synchronization layer that composes them into user actions.

pub mod concepts;
pub mod config;
pub mod database;
pub mod models;
pub mod sync;
pub mod utils;

// Re-export commonly used types
pub use concepts::{Concepts, Outcome, Session};
pub use config::Settings;
pub use sync::App;
pub use utils::errors::{ErrorKind, KinshipError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
