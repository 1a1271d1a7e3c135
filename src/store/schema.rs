use rusqlite::Connection;

use crate::store::sqlite::StoreError;

/// DDL for the fixed knowledge-base schema.
///
/// The table and column names are a contract shared with whatever populates
/// the knowledge base; they must not be renamed. Constraints mirror the data
/// model: specificity lives in [0,1], severity on a 1–5 scale, risk levels
/// are the three fixed tokens.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS BodySystems (
    system_id   INTEGER PRIMARY KEY,
    system_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS Symptoms (
    symptom_id     INTEGER PRIMARY KEY,
    symptom_name   TEXT NOT NULL,
    system_id      INTEGER NOT NULL REFERENCES BodySystems(system_id),
    severity_scale INTEGER NOT NULL CHECK (severity_scale BETWEEN 1 AND 5)
);

CREATE TABLE IF NOT EXISTS Diseases (
    disease_id   INTEGER PRIMARY KEY,
    disease_name TEXT NOT NULL,
    description  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS DiseaseSymptoms (
    disease_id  INTEGER NOT NULL REFERENCES Diseases(disease_id),
    symptom_id  INTEGER NOT NULL REFERENCES Symptoms(symptom_id),
    specificity REAL NOT NULL CHECK (specificity BETWEEN 0.0 AND 1.0),
    PRIMARY KEY (disease_id, symptom_id)
);

CREATE TABLE IF NOT EXISTS RiskFactors (
    factor_id   INTEGER PRIMARY KEY,
    factor_name TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS DiseaseRiskFactors (
    disease_id INTEGER NOT NULL REFERENCES Diseases(disease_id),
    factor_id  INTEGER NOT NULL REFERENCES RiskFactors(factor_id),
    risk_level TEXT NOT NULL CHECK (risk_level IN ('Alto', 'Medio', 'Basso')),
    PRIMARY KEY (disease_id, factor_id)
);
";

/// Tables checked by [`verify`] before a store is handed to callers
const EXPECTED_TABLES: [&str; 6] = [
    "BodySystems",
    "Symptoms",
    "Diseases",
    "DiseaseSymptoms",
    "RiskFactors",
    "DiseaseRiskFactors",
];

/// Apply the schema to a connection (idempotent).
pub fn init(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Check that every expected table is present.
///
/// Catching a stale or foreign database file at open time gives a clearer
/// failure than letting the first query error out.
pub fn verify(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in EXPECTED_TABLES {
        let found = stmt.exists([table])?;
        if !found {
            return Err(StoreError::Schema(format!("missing table {table}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        verify(&conn).unwrap();
    }

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        init(&conn).unwrap();
        verify(&conn).unwrap();
    }

    #[test]
    fn test_verify_rejects_foreign_database() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE unrelated (x INTEGER);")
            .unwrap();
        let err = verify(&conn).unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)));
    }

    #[test]
    fn test_specificity_range_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO Diseases VALUES (1, 'd', 'x');
             INSERT INTO BodySystems VALUES (1, 's');
             INSERT INTO Symptoms VALUES (1, 'sym', 1, 3);",
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO DiseaseSymptoms VALUES (1, 1, 1.5)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_risk_level_tokens_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO Diseases VALUES (1, 'd', 'x');
             INSERT INTO RiskFactors VALUES (1, 'f', 'y');",
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO DiseaseRiskFactors VALUES (1, 1, 'High')",
            [],
        );
        assert!(result.is_err());
    }
}
