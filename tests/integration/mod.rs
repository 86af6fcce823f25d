//! Integration tests module
//!
//! Organized by the area of the application each file drives through `App`.

pub mod concurrency_test;
pub mod content_test;
pub mod friends_test;
pub mod groups_test;
pub mod maps_test;
pub mod scenarios;
