use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a symptom in the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub i64);

impl std::fmt::Display for SymptomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a disease in the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseId(pub i64);

impl std::fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a risk factor in the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorId(pub i64);

impl std::fmt::Display for FactorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal strength of a disease–risk-factor association.
///
/// Storage keeps the original Italian tokens (`Alto`/`Medio`/`Basso`); those
/// are part of the fixed schema contract, so parsing accepts exactly the
/// three tokens and nothing else. Ordering is by severity: `High` sorts
/// before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Basso")]
    Low,
}

impl RiskLevel {
    /// Storage token for this level
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "Alto",
            Self::Medium => "Medio",
            Self::Low => "Basso",
        }
    }

    /// Severity rank used for ordering results (lower sorts first)
    #[must_use]
    pub fn severity_rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Alto" => Ok(Self::High),
            "Medio" => Ok(Self::Medium),
            "Basso" => Ok(Self::Low),
            other => Err(UnknownRiskLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a risk-level token outside the schema's enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk level {0:?} (expected Alto, Medio, or Basso)")]
pub struct UnknownRiskLevel(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_tokens_round_trip() {
        for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
            assert_eq!(level.as_str().parse::<RiskLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_risk_level_rejects_other_tokens() {
        assert!("High".parse::<RiskLevel>().is_err());
        assert!("alto".parse::<RiskLevel>().is_err());
        assert!("".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_risk_level_severity_ordering() {
        assert!(RiskLevel::High.severity_rank() < RiskLevel::Medium.severity_rank());
        assert!(RiskLevel::Medium.severity_rank() < RiskLevel::Low.severity_rank());
    }
}
