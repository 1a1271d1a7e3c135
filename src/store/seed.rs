use std::collections::HashSet;
use std::path::Path;

use rusqlite::params;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::types::RiskLevel;
use crate::store::sqlite::{KnowledgeStore, StoreStats};

/// Seed format version for compatibility checking
pub const SEED_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed data: {0}")]
    Invalid(String),

    #[error("failed to load seed into the store: {0}")]
    Store(#[from] rusqlite::Error),

    #[error(transparent)]
    Open(#[from] crate::store::sqlite::StoreError),
}

/// Serializable knowledge-base seed: the six relations plus file metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSeed {
    pub version: String,
    pub created_at: String,
    pub body_systems: Vec<SeedBodySystem>,
    pub symptoms: Vec<SeedSymptom>,
    pub diseases: Vec<SeedDisease>,
    pub disease_symptoms: Vec<SeedDiseaseSymptom>,
    pub risk_factors: Vec<SeedRiskFactor>,
    pub disease_risk_factors: Vec<SeedDiseaseRiskFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBodySystem {
    pub system_id: i64,
    pub system_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSymptom {
    pub symptom_id: i64,
    pub symptom_name: String,
    pub system_id: i64,
    pub severity_scale: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDisease {
    pub disease_id: i64,
    pub disease_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDiseaseSymptom {
    pub disease_id: i64,
    pub symptom_id: i64,
    pub specificity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRiskFactor {
    pub factor_id: i64,
    pub factor_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDiseaseRiskFactor {
    pub disease_id: i64,
    pub factor_id: i64,
    pub risk_level: RiskLevel,
}

impl KnowledgeSeed {
    /// The demo knowledge base embedded at compile time (validated by
    /// `build.rs`).
    pub fn embedded_demo() -> Result<Self, SeedError> {
        const EMBEDDED_SEED: &str = include_str!("../../data/demo_kb.json");
        Self::from_json(EMBEDDED_SEED)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seed: Self = serde_json::from_str(json)?;
        if seed.version != SEED_VERSION {
            warn!(
                expected = SEED_VERSION,
                found = seed.version,
                "seed version mismatch"
            );
        }
        Ok(seed)
    }

    /// Referential and range checks, so a bad seed fails loudly at import
    /// time instead of skewing scores later.
    pub fn validate(&self) -> Result<(), SeedError> {
        let system_ids: HashSet<i64> = self.body_systems.iter().map(|s| s.system_id).collect();
        let symptom_ids: HashSet<i64> = self.symptoms.iter().map(|s| s.symptom_id).collect();
        let disease_ids: HashSet<i64> = self.diseases.iter().map(|d| d.disease_id).collect();
        let factor_ids: HashSet<i64> = self.risk_factors.iter().map(|f| f.factor_id).collect();

        if system_ids.len() != self.body_systems.len() {
            return Err(SeedError::Invalid("duplicate body system id".into()));
        }
        if symptom_ids.len() != self.symptoms.len() {
            return Err(SeedError::Invalid("duplicate symptom id".into()));
        }
        if disease_ids.len() != self.diseases.len() {
            return Err(SeedError::Invalid("duplicate disease id".into()));
        }
        if factor_ids.len() != self.risk_factors.len() {
            return Err(SeedError::Invalid("duplicate risk factor id".into()));
        }

        for symptom in &self.symptoms {
            if !(1..=5).contains(&symptom.severity_scale) {
                return Err(SeedError::Invalid(format!(
                    "symptom {} has severity {} outside 1..=5",
                    symptom.symptom_id, symptom.severity_scale
                )));
            }
            if !system_ids.contains(&symptom.system_id) {
                return Err(SeedError::Invalid(format!(
                    "symptom {} references unknown body system {}",
                    symptom.symptom_id, symptom.system_id
                )));
            }
        }

        for assoc in &self.disease_symptoms {
            if !(0.0..=1.0).contains(&assoc.specificity) {
                return Err(SeedError::Invalid(format!(
                    "association ({}, {}) has specificity {} outside [0, 1]",
                    assoc.disease_id, assoc.symptom_id, assoc.specificity
                )));
            }
            if !disease_ids.contains(&assoc.disease_id) {
                return Err(SeedError::Invalid(format!(
                    "association references unknown disease {}",
                    assoc.disease_id
                )));
            }
            if !symptom_ids.contains(&assoc.symptom_id) {
                return Err(SeedError::Invalid(format!(
                    "association references unknown symptom {}",
                    assoc.symptom_id
                )));
            }
        }

        for link in &self.disease_risk_factors {
            if !disease_ids.contains(&link.disease_id) {
                return Err(SeedError::Invalid(format!(
                    "risk link references unknown disease {}",
                    link.disease_id
                )));
            }
            if !factor_ids.contains(&link.factor_id) {
                return Err(SeedError::Invalid(format!(
                    "risk link references unknown risk factor {}",
                    link.factor_id
                )));
            }
        }

        Ok(())
    }
}

impl KnowledgeStore {
    /// Load a validated seed into the store in one transaction.
    pub fn import_seed(&mut self, seed: &KnowledgeSeed) -> Result<StoreStats, SeedError> {
        seed.validate()?;

        let tx = self.connection_mut().transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO BodySystems VALUES (?1, ?2)")?;
            for system in &seed.body_systems {
                stmt.execute(params![system.system_id, system.system_name])?;
            }

            let mut stmt = tx.prepare("INSERT INTO Symptoms VALUES (?1, ?2, ?3, ?4)")?;
            for symptom in &seed.symptoms {
                stmt.execute(params![
                    symptom.symptom_id,
                    symptom.symptom_name,
                    symptom.system_id,
                    symptom.severity_scale,
                ])?;
            }

            let mut stmt = tx.prepare("INSERT INTO Diseases VALUES (?1, ?2, ?3)")?;
            for disease in &seed.diseases {
                stmt.execute(params![
                    disease.disease_id,
                    disease.disease_name,
                    disease.description,
                ])?;
            }

            let mut stmt = tx.prepare("INSERT INTO DiseaseSymptoms VALUES (?1, ?2, ?3)")?;
            for assoc in &seed.disease_symptoms {
                stmt.execute(params![assoc.disease_id, assoc.symptom_id, assoc.specificity])?;
            }

            let mut stmt = tx.prepare("INSERT INTO RiskFactors VALUES (?1, ?2, ?3)")?;
            for factor in &seed.risk_factors {
                stmt.execute(params![
                    factor.factor_id,
                    factor.factor_name,
                    factor.description,
                ])?;
            }

            let mut stmt = tx.prepare("INSERT INTO DiseaseRiskFactors VALUES (?1, ?2, ?3)")?;
            for link in &seed.disease_risk_factors {
                stmt.execute(params![
                    link.disease_id,
                    link.factor_id,
                    link.risk_level.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        let stats = StoreStats {
            body_systems: seed.body_systems.len(),
            symptoms: seed.symptoms.len(),
            diseases: seed.diseases.len(),
            disease_symptoms: seed.disease_symptoms.len(),
            risk_factors: seed.risk_factors.len(),
            disease_risk_factors: seed.disease_risk_factors.len(),
        };
        info!(%stats, "imported knowledge seed");
        Ok(stats)
    }

    /// Dump the store's contents back into the seed format, stamped with the
    /// current time.
    pub fn export_seed(&self) -> Result<KnowledgeSeed, SeedError> {
        let conn = self.connection();

        let mut stmt = conn.prepare("SELECT system_id, system_name FROM BodySystems ORDER BY system_id")?;
        let body_systems = stmt
            .query_map([], |row| {
                Ok(SeedBodySystem {
                    system_id: row.get(0)?,
                    system_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT symptom_id, symptom_name, system_id, severity_scale FROM Symptoms ORDER BY symptom_id",
        )?;
        let symptoms = stmt
            .query_map([], |row| {
                Ok(SeedSymptom {
                    symptom_id: row.get(0)?,
                    symptom_name: row.get(1)?,
                    system_id: row.get(2)?,
                    severity_scale: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT disease_id, disease_name, description FROM Diseases ORDER BY disease_id",
        )?;
        let diseases = stmt
            .query_map([], |row| {
                Ok(SeedDisease {
                    disease_id: row.get(0)?,
                    disease_name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT disease_id, symptom_id, specificity FROM DiseaseSymptoms ORDER BY disease_id, symptom_id",
        )?;
        let disease_symptoms = stmt
            .query_map([], |row| {
                Ok(SeedDiseaseSymptom {
                    disease_id: row.get(0)?,
                    symptom_id: row.get(1)?,
                    specificity: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT factor_id, factor_name, description FROM RiskFactors ORDER BY factor_id",
        )?;
        let risk_factors = stmt
            .query_map([], |row| {
                Ok(SeedRiskFactor {
                    factor_id: row.get(0)?,
                    factor_name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT disease_id, factor_id, risk_level FROM DiseaseRiskFactors ORDER BY disease_id, factor_id",
        )?;
        let disease_risk_factors = stmt
            .query_map([], |row| {
                let token: String = row.get(2)?;
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, token))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(disease_id, factor_id, token)| {
                let risk_level = token
                    .parse::<RiskLevel>()
                    .map_err(|e| SeedError::Invalid(format!("in DiseaseRiskFactors: {e}")))?;
                Ok(SeedDiseaseRiskFactor {
                    disease_id,
                    factor_id,
                    risk_level,
                })
            })
            .collect::<Result<Vec<_>, SeedError>>()?;

        Ok(KnowledgeSeed {
            version: SEED_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            body_systems,
            symptoms,
            diseases,
            disease_symptoms,
            risk_factors,
            disease_risk_factors,
        })
    }

    /// In-memory store populated with the embedded demo knowledge base.
    pub fn open_demo() -> Result<Self, SeedError> {
        let mut store = Self::open_in_memory()?;
        let seed = KnowledgeSeed::embedded_demo()?;
        store.import_seed(&seed)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_seed() -> KnowledgeSeed {
        KnowledgeSeed {
            version: SEED_VERSION.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            body_systems: vec![SeedBodySystem {
                system_id: 1,
                system_name: "Generale".into(),
            }],
            symptoms: vec![SeedSymptom {
                symptom_id: 1,
                symptom_name: "Febbre".into(),
                system_id: 1,
                severity_scale: 3,
            }],
            diseases: vec![SeedDisease {
                disease_id: 1,
                disease_name: "Influenza".into(),
                description: "Infezione virale".into(),
            }],
            disease_symptoms: vec![SeedDiseaseSymptom {
                disease_id: 1,
                symptom_id: 1,
                specificity: 0.5,
            }],
            risk_factors: vec![],
            disease_risk_factors: vec![],
        }
    }

    #[test]
    fn test_import_minimal_seed() {
        let mut store = KnowledgeStore::open_in_memory().unwrap();
        let stats = store.import_seed(&minimal_seed()).unwrap();
        assert_eq!(stats.symptoms, 1);
        assert_eq!(store.list_symptoms().unwrap().len(), 1);
    }

    #[test]
    fn test_validate_rejects_out_of_range_specificity() {
        let mut seed = minimal_seed();
        seed.disease_symptoms[0].specificity = 1.2;
        let err = seed.validate().unwrap_err();
        assert!(matches!(err, SeedError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_dangling_symptom() {
        let mut seed = minimal_seed();
        seed.disease_symptoms[0].symptom_id = 42;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_severity() {
        let mut seed = minimal_seed();
        seed.symptoms[0].severity_scale = 6;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_embedded_demo_parses_and_validates() {
        let seed = KnowledgeSeed::embedded_demo().unwrap();
        assert_eq!(seed.version, SEED_VERSION);
        seed.validate().unwrap();
        assert!(!seed.diseases.is_empty());
    }

    #[test]
    fn test_open_demo_store() {
        let store = KnowledgeStore::open_demo().unwrap();
        assert!(!store.list_symptoms().unwrap().is_empty());
    }

    #[test]
    fn test_export_round_trips_import() {
        let mut store = KnowledgeStore::open_in_memory().unwrap();
        let seed = KnowledgeSeed::embedded_demo().unwrap();
        store.import_seed(&seed).unwrap();

        let exported = store.export_seed().unwrap();
        assert_eq!(exported.body_systems.len(), seed.body_systems.len());
        assert_eq!(exported.disease_symptoms.len(), seed.disease_symptoms.len());
        assert_eq!(
            exported.disease_risk_factors.len(),
            seed.disease_risk_factors.len()
        );
        exported.validate().unwrap();
    }

    #[test]
    fn test_risk_level_token_in_json() {
        let json = r#"{"disease_id": 1, "factor_id": 2, "risk_level": "Alto"}"#;
        let link: SeedDiseaseRiskFactor = serde_json::from_str(json).unwrap();
        assert_eq!(link.risk_level, RiskLevel::High);
    }
}
