//! Core data types for symptom-to-disease matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`SymptomEntry`]: A symptom joined with its body system, as listed for selection
//! - [`DiseaseMatch`]: One ranked candidate produced by the matching engine
//! - [`RiskFactorEntry`]: A risk factor recorded against a disease
//! - [`SymptomId`], [`DiseaseId`], [`FactorId`]: Knowledge-base identifiers
//! - [`RiskLevel`]: Ordinal risk-factor strength (stored as `Alto`/`Medio`/`Basso`)
//!
//! [`SymptomEntry`]: symptom::SymptomEntry
//! [`DiseaseMatch`]: disease::DiseaseMatch
//! [`RiskFactorEntry`]: risk::RiskFactorEntry
//! [`SymptomId`]: types::SymptomId
//! [`DiseaseId`]: types::DiseaseId
//! [`FactorId`]: types::FactorId
//! [`RiskLevel`]: types::RiskLevel

pub mod disease;
pub mod risk;
pub mod symptom;
pub mod types;
