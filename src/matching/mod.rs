//! Matching engine and scoring for symptom-to-disease ranking.
//!
//! [`engine::MatchingEngine`] is the public entry point; it materializes
//! association rows through the store and hands them to the pure functions
//! in [`scoring`], where filtering, aggregation, derived fields, ordering,
//! and truncation are unit-testable without a database.

pub mod engine;
pub mod scoring;

pub use engine::{MatchError, MatchingEngine};
pub use scoring::{MAX_RESULTS, MIN_MATCHING_SYMPTOMS};
