//! Integration test scenarios
//!
//! Complete user journeys touching several recipes in sequence.

pub mod complete_user_journey_test;
