use std::collections::HashMap;

use crate::core::disease::DiseaseMatch;
use crate::core::types::DiseaseId;
use crate::store::sqlite::AssociationRow;

/// Precision floor: a candidate needs at least this many distinct matching
/// symptoms. A single incidental match is not diagnostically meaningful;
/// deliberately a constant, not configuration.
pub const MIN_MATCHING_SYMPTOMS: u32 = 2;

/// Ranked output is truncated to this many candidates.
pub const MAX_RESULTS: usize = 10;

/// Per-disease aggregate over the matched association rows.
#[derive(Debug, Clone)]
struct CandidateAggregate {
    disease_id: DiseaseId,
    disease_name: String,
    description: String,
    matching_symptoms: u32,
    specificity_sum: f64,
}

/// Turn materialized association rows into the ranked candidate list:
/// aggregate per disease, apply the precision floor, compute the derived
/// display fields, sort, truncate.
///
/// Rows must arrive grouped in a stable order (the store orders by disease
/// id, then symptom id); aggregation preserves first-seen disease order, and
/// the stable sort keeps that order for equal rank weights, so ties are
/// deterministic within a call and across calls on unchanged storage.
///
/// `totals` maps each candidate to its distinct-symptom count across the
/// whole association table, independent of the selection.
pub fn rank_candidates(
    rows: &[AssociationRow],
    totals: &HashMap<DiseaseId, u32>,
) -> Vec<DiseaseMatch> {
    let mut order: Vec<DiseaseId> = Vec::new();
    let mut aggregates: HashMap<DiseaseId, CandidateAggregate> = HashMap::new();

    for row in rows {
        let entry = aggregates.entry(row.disease_id).or_insert_with(|| {
            order.push(row.disease_id);
            CandidateAggregate {
                disease_id: row.disease_id,
                disease_name: row.disease_name.clone(),
                description: row.description.clone(),
                matching_symptoms: 0,
                specificity_sum: 0.0,
            }
        });
        entry.matching_symptoms += 1;
        // A future per-symptom weight would scale `row.specificity` here.
        entry.specificity_sum += row.specificity;
    }

    let mut results: Vec<DiseaseMatch> = order
        .into_iter()
        .filter_map(|id| aggregates.remove(&id))
        .filter(|agg| agg.matching_symptoms >= MIN_MATCHING_SYMPTOMS)
        .map(|agg| {
            let total = totals
                .get(&agg.disease_id)
                .copied()
                // totals always cover the candidates; the matched count is a
                // safe floor if a row slips through
                .unwrap_or(agg.matching_symptoms);
            let avg_specificity = agg.specificity_sum / f64::from(agg.matching_symptoms);
            let match_fraction = f64::from(agg.matching_symptoms) / f64::from(total.max(1));

            DiseaseMatch {
                disease_id: agg.disease_id,
                disease_name: agg.disease_name,
                description: agg.description,
                matching_symptoms: agg.matching_symptoms,
                total_disease_symptoms: total,
                match_percentage: round2(match_fraction * 100.0),
                specificity_score: round2(avg_specificity * 100.0),
                avg_specificity,
            }
        })
        .collect();

    // Descending by coverage × specificity on unrounded values; the sort is
    // stable, so equal weights keep materialization order.
    results.sort_by(|a, b| {
        b.rank_weight()
            .partial_cmp(&a.rank_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(MAX_RESULTS);
    results
}

/// Round to two decimals, matching the knowledge base's display contract.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SymptomId;

    fn row(disease: i64, symptom: i64, specificity: f64) -> AssociationRow {
        AssociationRow {
            disease_id: DiseaseId(disease),
            disease_name: format!("disease-{disease}"),
            description: String::new(),
            symptom_id: SymptomId(symptom),
            specificity,
        }
    }

    #[test]
    fn test_worked_two_disease_scenario() {
        // Disease A has symptoms {1,2,3} (0.9, 0.5, 0.2), B has {1,2}
        // (0.4, 0.4); selection is {1,2}.
        let rows = vec![
            row(1, 1, 0.9),
            row(1, 2, 0.5),
            row(2, 1, 0.4),
            row(2, 2, 0.4),
        ];
        let totals = HashMap::from([(DiseaseId(1), 3), (DiseaseId(2), 2)]);

        let ranked = rank_candidates(&rows, &totals);
        assert_eq!(ranked.len(), 2);

        let a = &ranked[0];
        assert_eq!(a.disease_id, DiseaseId(1));
        assert_eq!(a.matching_symptoms, 2);
        assert_eq!(a.total_disease_symptoms, 3);
        assert!((a.match_percentage - 66.67).abs() < 1e-9);
        assert!((a.specificity_score - 70.0).abs() < 1e-9);
        assert!((a.rank_weight() - 2.0 / 3.0 * 0.7).abs() < 1e-9);

        let b = &ranked[1];
        assert_eq!(b.disease_id, DiseaseId(2));
        assert!((b.match_percentage - 100.0).abs() < 1e-9);
        assert!((b.specificity_score - 40.0).abs() < 1e-9);
        assert!((b.rank_weight() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_precision_floor_drops_single_matches() {
        let rows = vec![row(1, 1, 0.9), row(2, 1, 0.8), row(2, 2, 0.8)];
        let totals = HashMap::from([(DiseaseId(1), 5), (DiseaseId(2), 2)]);

        let ranked = rank_candidates(&rows, &totals);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].disease_id, DiseaseId(2));
    }

    #[test]
    fn test_all_single_matches_yield_empty_result() {
        let rows = vec![row(1, 1, 0.9), row(2, 2, 0.9), row(3, 3, 0.9)];
        let totals = HashMap::from([(DiseaseId(1), 4), (DiseaseId(2), 4), (DiseaseId(3), 4)]);
        assert!(rank_candidates(&rows, &totals).is_empty());
    }

    #[test]
    fn test_truncates_to_max_results() {
        let mut rows = Vec::new();
        let mut totals = HashMap::new();
        for disease in 0..15i64 {
            rows.push(row(disease, 1, 0.5));
            rows.push(row(disease, 2, 0.5));
            totals.insert(DiseaseId(disease), 2 + u32::try_from(disease).unwrap());
        }
        let ranked = rank_candidates(&rows, &totals);
        assert_eq!(ranked.len(), MAX_RESULTS);
    }

    #[test]
    fn test_sorted_descending_by_unrounded_rank_weight() {
        let mut rows = Vec::new();
        let mut totals = HashMap::new();
        for disease in 0..8u32 {
            let spec = 0.1 + 0.1 * f64::from(disease);
            rows.push(row(i64::from(disease), 1, spec));
            rows.push(row(i64::from(disease), 2, spec));
            totals.insert(DiseaseId(i64::from(disease)), 3);
        }
        let ranked = rank_candidates(&rows, &totals);
        for pair in ranked.windows(2) {
            assert!(pair[0].rank_weight() >= pair[1].rank_weight());
        }
    }

    #[test]
    fn test_ties_keep_materialization_order() {
        // Identical profiles; the earlier disease id must stay first.
        let rows = vec![
            row(7, 1, 0.5),
            row(7, 2, 0.5),
            row(9, 1, 0.5),
            row(9, 2, 0.5),
        ];
        let totals = HashMap::from([(DiseaseId(7), 4), (DiseaseId(9), 4)]);
        let ranked = rank_candidates(&rows, &totals);
        assert_eq!(ranked[0].disease_id, DiseaseId(7));
        assert_eq!(ranked[1].disease_id, DiseaseId(9));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let rows = vec![
            row(1, 1, 0.0),
            row(1, 2, 1.0),
            row(2, 1, 1.0),
            row(2, 2, 1.0),
        ];
        let totals = HashMap::from([(DiseaseId(1), 2), (DiseaseId(2), 2)]);
        for candidate in rank_candidates(&rows, &totals) {
            assert!((0.0..=100.0).contains(&candidate.match_percentage));
            assert!((0.0..=100.0).contains(&candidate.specificity_score));
            assert!(candidate.matching_symptoms <= candidate.total_disease_symptoms);
        }
    }

    #[test]
    fn test_round2() {
        assert!((round2(66.666_666) - 66.67).abs() < 1e-9);
        assert!((round2(100.0) - 100.0).abs() < 1e-9);
        assert!((round2(0.004_9) - 0.0).abs() < 1e-9);
    }
}
