//! Knowledge store: read-only relational access to the diagnostic
//! knowledge base, plus the administration path that populates it.
//!
//! The fixed schema ([`schema::SCHEMA`]) is a contract shared with whatever
//! produced the database; [`sqlite::KnowledgeStore`] is the explicitly
//! passed connection handle over it. Queries only materialize rows — all
//! aggregation, ranking, and tie-breaking live in [`crate::matching`].

pub mod schema;
pub mod seed;
pub mod sqlite;

pub use seed::{KnowledgeSeed, SeedError};
pub use sqlite::{AssociationRow, KnowledgeStore, StoreConfig, StoreError, StoreStats};
