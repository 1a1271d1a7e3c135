use serde::{Deserialize, Serialize};

use crate::core::types::DiseaseId;

/// One ranked candidate from matching a symptom selection against the
/// knowledge base.
///
/// `match_percentage` and `specificity_score` are the rounded display values
/// (two decimals, 0–100). Ranking never uses them: the engine orders by
/// [`DiseaseMatch::rank_weight`], computed on the unrounded intermediates,
/// so two candidates that round to the same display values still keep a
/// faithful order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    pub disease_id: DiseaseId,
    pub disease_name: String,
    pub description: String,

    /// Distinct selected symptoms associated with this disease
    pub matching_symptoms: u32,

    /// Distinct symptoms associated with this disease overall, regardless
    /// of the selection
    pub total_disease_symptoms: u32,

    /// `matching / total × 100`, rounded to two decimals
    pub match_percentage: f64,

    /// Mean specificity across the matched association rows × 100, rounded
    /// to two decimals
    pub specificity_score: f64,

    /// Unrounded mean specificity over the matched rows; kept so the rank
    /// weight and any future per-symptom weighting stay exact
    #[serde(skip)]
    pub avg_specificity: f64,
}

impl DiseaseMatch {
    /// Ranking key: coverage × diagnostic specificity, on unrounded values.
    ///
    /// The product rewards candidates that are both comprehensive (the
    /// selection covers most of the disease's profile) and individually
    /// diagnostic; neither factor alone can lift a candidate past one that
    /// is strong on both.
    #[must_use]
    pub fn rank_weight(&self) -> f64 {
        let coverage =
            f64::from(self.matching_symptoms) / f64::from(self.total_disease_symptoms.max(1));
        coverage * self.avg_specificity
    }
}
