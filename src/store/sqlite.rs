use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::Duration;

use rusqlite::{params_from_iter, Connection, OpenFlags};
use thiserror::Error;
use tracing::debug;

use crate::core::risk::RiskFactorEntry;
use crate::core::symptom::SymptomEntry;
use crate::core::types::{DiseaseId, RiskLevel, SymptomId};
use crate::store::schema;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("knowledge store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("knowledge store query exceeded the {0:?} timeout")]
    Timeout(Duration),

    #[error("knowledge store schema mismatch: {0}")]
    Schema(String),
}

/// Connection settings for a [`KnowledgeStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on how long a single query may wait on the database.
    /// Applied as the SQLite busy timeout; exceeding it surfaces
    /// [`StoreError::Timeout`].
    pub query_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(5),
        }
    }
}

/// One disease–symptom association row materialized for the matching engine.
///
/// The engine receives these unaggregated so that filtering, aggregation,
/// and ranking happen in plain Rust where they can be unit-tested without a
/// database.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRow {
    pub disease_id: DiseaseId,
    pub disease_name: String,
    pub description: String,
    pub symptom_id: SymptomId,
    pub specificity: f64,
}

/// Row counts per table of a knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub body_systems: usize,
    pub symptoms: usize,
    pub diseases: usize,
    pub disease_symptoms: usize,
    pub risk_factors: usize,
    pub disease_risk_factors: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} body systems, {} symptoms, {} diseases, {} associations, {} risk factors, {} risk links",
            self.body_systems,
            self.symptoms,
            self.diseases,
            self.disease_symptoms,
            self.risk_factors,
            self.disease_risk_factors
        )
    }
}

/// Read-only handle over the relational knowledge base.
///
/// One value owns one SQLite connection; callers pass the handle explicitly
/// (there is no global connection state). All operations are pure reads, so
/// concurrent callers may simply open one store each.
pub struct KnowledgeStore {
    conn: Connection,
    query_timeout: Duration,
}

impl KnowledgeStore {
    /// Open an existing knowledge base read-only and verify its schema.
    pub fn open(path: &Path, config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::from_connection(conn, config)
    }

    /// Open (or create) a knowledge base read-write with the schema applied.
    /// Used by the administration commands that populate the store.
    pub fn create(path: &Path, config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        schema::init(&conn)?;
        Self::from_connection(conn, config)
    }

    /// In-memory store with the schema applied. Starts empty.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;
        Self::from_connection(conn, StoreConfig::default())
    }

    fn from_connection(conn: Connection, config: StoreConfig) -> Result<Self, StoreError> {
        conn.busy_timeout(config.query_timeout)?;
        schema::verify(&conn)?;
        Ok(Self {
            conn,
            query_timeout: config.query_timeout,
        })
    }

    /// The underlying connection, for seed import and statistics.
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// All symptoms joined with their body system, ordered by
    /// (system name, symptom name) ascending.
    pub fn list_symptoms(&self) -> Result<Vec<SymptomEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT s.symptom_id, s.symptom_name, b.system_name, s.severity_scale
                 FROM Symptoms s
                 JOIN BodySystems b ON s.system_id = b.system_id
                 ORDER BY b.system_name, s.symptom_name",
            )
            .map_err(|e| self.classify(e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SymptomEntry {
                    symptom_id: SymptomId(row.get(0)?),
                    symptom_name: row.get(1)?,
                    system_name: row.get(2)?,
                    severity_scale: row.get(3)?,
                })
            })
            .map_err(|e| self.classify(e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))?;

        debug!(count = rows.len(), "listed symptoms");
        Ok(rows)
    }

    /// Association rows whose symptom is in the selection, joined with the
    /// owning disease, ordered by (disease id, symptom id) so downstream
    /// aggregation sees a stable order.
    pub fn matched_associations(
        &self,
        symptom_ids: &BTreeSet<SymptomId>,
    ) -> Result<Vec<AssociationRow>, StoreError> {
        if symptom_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; symptom_ids.len()].join(",");
        let sql = format!(
            "SELECT ds.disease_id, d.disease_name, d.description, ds.symptom_id, ds.specificity
             FROM DiseaseSymptoms ds
             JOIN Diseases d ON ds.disease_id = d.disease_id
             WHERE ds.symptom_id IN ({placeholders})
             ORDER BY ds.disease_id, ds.symptom_id"
        );

        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.classify(e))?;
        let rows = stmt
            .query_map(params_from_iter(symptom_ids.iter().map(|id| id.0)), |row| {
                Ok(AssociationRow {
                    disease_id: DiseaseId(row.get(0)?),
                    disease_name: row.get(1)?,
                    description: row.get(2)?,
                    symptom_id: SymptomId(row.get(3)?),
                    specificity: row.get(4)?,
                })
            })
            .map_err(|e| self.classify(e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))?;

        debug!(
            selected = symptom_ids.len(),
            rows = rows.len(),
            "materialized matched associations"
        );
        Ok(rows)
    }

    /// Distinct-symptom count per disease, for the given candidates only.
    /// The count covers the whole association table, independent of any
    /// selection.
    pub fn symptom_totals(
        &self,
        disease_ids: &[DiseaseId],
    ) -> Result<HashMap<DiseaseId, u32>, StoreError> {
        if disease_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; disease_ids.len()].join(",");
        let sql = format!(
            "SELECT disease_id, COUNT(DISTINCT symptom_id)
             FROM DiseaseSymptoms
             WHERE disease_id IN ({placeholders})
             GROUP BY disease_id"
        );

        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.classify(e))?;
        let totals = stmt
            .query_map(params_from_iter(disease_ids.iter().map(|id| id.0)), |row| {
                Ok((DiseaseId(row.get(0)?), row.get::<_, u32>(1)?))
            })
            .map_err(|e| self.classify(e))?
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| self.classify(e))?;

        Ok(totals)
    }

    /// Risk factors recorded against a disease, ordered by severity
    /// (Alto, Medio, Basso); the stable sort keeps storage order within a
    /// level. An unknown disease id yields an empty Vec: "no risk factors
    /// recorded" and "disease absent" are deliberately indistinguishable.
    pub fn risk_factors(&self, disease_id: DiseaseId) -> Result<Vec<RiskFactorEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT rf.factor_name, rf.description, drf.risk_level
                 FROM RiskFactors rf
                 JOIN DiseaseRiskFactors drf ON rf.factor_id = drf.factor_id
                 WHERE drf.disease_id = ?1
                 ORDER BY drf.rowid",
            )
            .map_err(|e| self.classify(e))?;

        let mut entries = Vec::new();
        let mut rows = stmt.query([disease_id.0]).map_err(|e| self.classify(e))?;
        while let Some(row) = rows.next().map_err(|e| self.classify(e))? {
            let token: String = row.get(2).map_err(|e| self.classify(e))?;
            let risk_level: RiskLevel = token
                .parse()
                .map_err(|e| StoreError::Schema(format!("in DiseaseRiskFactors: {e}")))?;
            entries.push(RiskFactorEntry {
                factor_name: row.get(0).map_err(|e| self.classify(e))?,
                description: row.get(1).map_err(|e| self.classify(e))?,
                risk_level,
            });
        }

        entries.sort_by_key(|e| e.risk_level.severity_rank());
        debug!(%disease_id, count = entries.len(), "fetched risk factors");
        Ok(entries)
    }

    /// Row counts per table, for the administration commands.
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let count = |table: &str| -> Result<usize, StoreError> {
            // Table names come from the fixed schema list, never from input
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .map_err(|e| self.classify(e))
        };

        Ok(StoreStats {
            body_systems: count("BodySystems")?,
            symptoms: count("Symptoms")?,
            diseases: count("Diseases")?,
            disease_symptoms: count("DiseaseSymptoms")?,
            risk_factors: count("RiskFactors")?,
            disease_risk_factors: count("DiseaseRiskFactors")?,
        })
    }

    /// Map a query-time failure to the store taxonomy: a busy or interrupted
    /// query becomes a timeout, everything else is unavailability.
    fn classify(&self, err: rusqlite::Error) -> StoreError {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ErrorCode::OperationInterrupted =>
            {
                StoreError::Timeout(self.query_timeout)
            }
            _ => StoreError::Unavailable(err),
        }
    }
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}
