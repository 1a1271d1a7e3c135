//! # dx-solver
//!
//! A library for narrowing a differential diagnosis from a set of observed
//! symptoms against a relational knowledge base of diseases, symptoms, and
//! risk factors.
//!
//! Given the symptoms a clinician selected, dx-solver computes which
//! diseases are plausible, with what confidence, and in what order: for each
//! candidate it reports how much of the disease's known symptom profile the
//! selection covers (match percentage) and how diagnostic the matched
//! symptoms are on average (specificity score), ranked by the product of
//! coverage and specificity.
//!
//! ## Design
//!
//! - **Knowledge store**: read-only SQLite access to the fixed relational
//!   schema; queries only materialize rows.
//! - **Matching engine**: pure filter → aggregate → derive → sort → truncate
//!   over those rows, so the ranking and tie-break logic is testable without
//!   a database.
//!
//! Candidates matching fewer than two distinct selected symptoms are
//! dropped (a single incidental match is not diagnostically meaningful) and
//! the ranked output is truncated to the top ten.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dx_solver::{KnowledgeStore, MatchingEngine, SymptomId};
//!
//! # fn main() -> anyhow::Result<()> {
//! // In-memory store seeded with the embedded demo knowledge base
//! let store = KnowledgeStore::open_demo()?;
//!
//! let engine = MatchingEngine::new(&store);
//! let ranked = engine.match_diseases(&[SymptomId(1), SymptomId(12)])?;
//!
//! for candidate in ranked {
//!     println!(
//!         "{}: {}% match, {}% specificity",
//!         candidate.disease_name, candidate.match_percentage, candidate.specificity_score
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Data types for symptoms, diseases, matches, and risk factors
//! - [`store`]: Knowledge store, schema, and seed import
//! - [`matching`]: Matching engine and scoring
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::disease::DiseaseMatch;
pub use crate::core::risk::RiskFactorEntry;
pub use crate::core::symptom::SymptomEntry;
pub use crate::core::types::{DiseaseId, FactorId, RiskLevel, SymptomId};
pub use matching::{MatchError, MatchingEngine};
pub use store::{KnowledgeSeed, KnowledgeStore, StoreConfig, StoreError};
