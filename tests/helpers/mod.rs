//! Test helpers module
//!
//! Shared setup for the integration tests: an `App` over a fresh in-memory
//! store, user and content builders, a store wrapper that injects failures,
//! and PostgreSQL access for the tests gated on `TEST_DATABASE_URL`.

#![allow(dead_code)]

pub mod database_helper;
pub mod failing_store;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use failing_store::*;
pub use test_context::*;
pub use test_data::*;
