use serde::{Deserialize, Serialize};

use crate::core::types::RiskLevel;

/// One risk factor recorded against a disease, with its association
/// strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorEntry {
    pub factor_name: String,
    pub description: String,
    pub risk_level: RiskLevel,
}

impl std::fmt::Display for RiskFactorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.risk_level, self.factor_name)
    }
}
