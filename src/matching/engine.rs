use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::core::disease::DiseaseMatch;
use crate::core::risk::RiskFactorEntry;
use crate::core::symptom::SymptomEntry;
use crate::core::types::{DiseaseId, SymptomId};
use crate::matching::scoring;
use crate::store::sqlite::{KnowledgeStore, StoreError};

#[derive(Error, Debug)]
pub enum MatchError {
    /// The caller handed over an empty selection. This is a caller-side
    /// defect (the front end must detect "nothing selected" before calling);
    /// the engine refuses it before touching storage rather than absorbing
    /// it into an empty result.
    #[error("no symptoms selected")]
    EmptySymptomSet,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The matching engine: pure scoring and ranking over a borrowed
/// [`KnowledgeStore`] handle.
///
/// Stateless between calls; every operation is a synchronous read that runs
/// to completion, so two calls with the same selection against unchanged
/// storage return identical results.
pub struct MatchingEngine<'a> {
    store: &'a KnowledgeStore,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self { store }
    }

    /// All symptoms available for selection, ordered by body system and
    /// name.
    pub fn list_symptoms(&self) -> Result<Vec<SymptomEntry>, MatchError> {
        Ok(self.store.list_symptoms()?)
    }

    /// Rank plausible diseases for a selection of symptom identifiers.
    ///
    /// The selection is deduplicated; each retained candidate matches at
    /// least [`scoring::MIN_MATCHING_SYMPTOMS`] distinct selected symptoms,
    /// and at most [`scoring::MAX_RESULTS`] candidates come back, ordered by
    /// descending coverage × average specificity. An empty result is a
    /// legitimate outcome (no disease met the floor), not an error.
    ///
    /// # Errors
    ///
    /// [`MatchError::EmptySymptomSet`] when `symptom_ids` is empty (raised
    /// before any storage query); [`MatchError::Store`] when the knowledge
    /// base cannot be read.
    pub fn match_diseases(
        &self,
        symptom_ids: &[SymptomId],
    ) -> Result<Vec<DiseaseMatch>, MatchError> {
        if symptom_ids.is_empty() {
            return Err(MatchError::EmptySymptomSet);
        }

        let selected: BTreeSet<SymptomId> = symptom_ids.iter().copied().collect();
        let rows = self.store.matched_associations(&selected)?;
        if rows.is_empty() {
            debug!(selected = selected.len(), "no associations matched");
            return Ok(Vec::new());
        }

        // Candidate ids in first-seen (materialization) order
        let mut candidates: Vec<DiseaseId> = Vec::new();
        for row in &rows {
            if candidates.last() != Some(&row.disease_id) {
                candidates.push(row.disease_id);
            }
        }

        let totals = self.store.symptom_totals(&candidates)?;
        let ranked = scoring::rank_candidates(&rows, &totals);
        debug!(
            selected = selected.len(),
            candidates = candidates.len(),
            ranked = ranked.len(),
            "ranked disease candidates"
        );
        Ok(ranked)
    }

    /// Risk factors for a chosen disease, ordered by severity. An unknown
    /// disease id yields an empty Vec.
    pub fn risk_factors(&self, disease_id: DiseaseId) -> Result<Vec<RiskFactorEntry>, MatchError> {
        Ok(self.store.risk_factors(disease_id)?)
    }
}
