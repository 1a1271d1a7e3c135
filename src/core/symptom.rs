use serde::{Deserialize, Serialize};

use crate::core::types::SymptomId;

/// One row of the symptom listing: a symptom joined with its body system.
///
/// This is what a front end renders for symptom selection; ordering
/// (body system, then symptom name) comes from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomEntry {
    /// Knowledge-base identifier the caller must hand back when matching
    pub symptom_id: SymptomId,

    /// Human-readable symptom name
    pub symptom_name: String,

    /// Name of the body system this symptom belongs to
    pub system_name: String,

    /// Severity on the knowledge base's 1–5 scale
    pub severity_scale: u8,
}

impl std::fmt::Display for SymptomEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} — {} ({}/5)",
            self.system_name, self.symptom_name, self.severity_scale
        )
    }
}
