//! Batch estimation
//!
//! Every item is estimated independently; a failing item is recorded in place
//! and never aborts its siblings. Totals cover successful items only and are
//! rounded once, after summation.
//!
//! Includes both sequential and parallel (Rayon) implementations. Both return
//! results in input order and produce identical reports.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ImpactError};
use crate::estimator::{ImpactEstimator, ImpactReport};
use crate::utils::round2;

/// One `(waste_type, weight_kg)` input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactItem {
    pub waste_type: String,
    pub weight_kg: f64,
}

impl ImpactItem {
    pub fn new(waste_type: impl Into<String>, weight_kg: f64) -> Self {
        Self { waste_type: waste_type.into(), weight_kg }
    }
}

/// An item as it arrived at the JSON boundary: parsed, or already rejected
pub type BatchEntry = Result<ImpactItem, ImpactError>;

/// Per-item failure payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemError {
    /// Position in the input sequence
    pub index: usize,
    pub error: String,
    pub kind: ErrorKind,
}

/// Result for a single batch item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemOutcome {
    Success(ImpactReport),
    Failure(ItemError),
}

impl ItemOutcome {
    pub fn report(&self) -> Option<&ImpactReport> {
        match self {
            ItemOutcome::Success(report) => Some(report),
            ItemOutcome::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.report().is_some()
    }
}

/// Aggregates over successful items
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchTotals {
    pub total_waste_diverted_kg: f64,
    pub total_co2_saved_kg: f64,
    pub total_energy_saved_kwh: f64,
    pub total_water_saved_liters: f64,
    /// Items without a trees-equivalent count as 0
    pub total_trees_saved: f64,
    /// Mean score of successful items; 0 when there are none
    pub average_earth_impact_score: f64,
}

impl BatchTotals {
    /// Sum reported per-item values, then round each aggregate once
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a ImpactReport>) -> Self {
        let mut sums = BatchTotals::default();
        let mut score_sum = 0.0;
        let mut count = 0usize;

        for report in reports {
            sums.total_waste_diverted_kg += report.waste_diverted_kg;
            sums.total_co2_saved_kg += report.co2_saved_kg;
            sums.total_energy_saved_kwh += report.energy_saved_kwh;
            sums.total_water_saved_liters += report.water_saved_liters;
            sums.total_trees_saved += report.trees_saved.unwrap_or(0.0);
            score_sum += report.earth_impact_score;
            count += 1;
        }

        let average = if count == 0 { 0.0 } else { score_sum / count as f64 };

        BatchTotals {
            total_waste_diverted_kg: round2(sums.total_waste_diverted_kg),
            total_co2_saved_kg: round2(sums.total_co2_saved_kg),
            total_energy_saved_kwh: round2(sums.total_energy_saved_kwh),
            total_water_saved_liters: round2(sums.total_water_saved_liters),
            total_trees_saved: round2(sums.total_trees_saved),
            average_earth_impact_score: round2(average),
        }
    }
}

/// Batch result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// One entry per input item, in input order
    pub results: Vec<ItemOutcome>,
    pub totals: BatchTotals,
    pub total_items_processed: usize,
    pub successful_calculations: usize,
}

impl BatchReport {
    fn from_outcomes(results: Vec<ItemOutcome>) -> Self {
        let totals = BatchTotals::from_reports(results.iter().filter_map(ItemOutcome::report));
        let successful_calculations = results.iter().filter(|r| r.is_success()).count();
        let total_items_processed = results.len();

        tracing::debug!(
            "Estimated batch of {} items ({} successful)",
            total_items_processed,
            successful_calculations
        );

        Self {
            results,
            totals,
            total_items_processed,
            successful_calculations,
        }
    }

    /// Failed items only
    pub fn failures(&self) -> impl Iterator<Item = &ItemError> {
        self.results.iter().filter_map(|r| match r {
            ItemOutcome::Failure(e) => Some(e),
            ItemOutcome::Success(_) => None,
        })
    }
}

impl<'t> ImpactEstimator<'t> {
    fn evaluate(&self, index: usize, entry: Result<&ImpactItem, &ImpactError>) -> ItemOutcome {
        let result = entry
            .map_err(|e| e.clone())
            .and_then(|item| self.estimate(&item.waste_type, item.weight_kg));

        match result {
            Ok(report) => ItemOutcome::Success(report),
            Err(e) => ItemOutcome::Failure(ItemError {
                index,
                error: e.to_string(),
                kind: e.kind(),
            }),
        }
    }

    /// Estimate every item sequentially
    pub fn estimate_batch(&self, items: &[ImpactItem]) -> BatchReport {
        let results = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.evaluate(i, Ok(item)))
            .collect();
        BatchReport::from_outcomes(results)
    }

    /// Estimate every item IN PARALLEL using Rayon
    ///
    /// Items are independent; the indexed collect keeps input order.
    pub fn estimate_batch_parallel(&self, items: &[ImpactItem]) -> BatchReport {
        let results = items
            .par_iter()
            .enumerate()
            .map(|(i, item)| self.evaluate(i, Ok(item)))
            .collect();
        BatchReport::from_outcomes(results)
    }

    /// Estimate entries parsed at the JSON boundary (some may be pre-rejected)
    pub fn estimate_entries(&self, entries: &[BatchEntry]) -> BatchReport {
        let results = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| self.evaluate(i, entry.as_ref()))
            .collect();
        BatchReport::from_outcomes(results)
    }

    /// Parallel variant of `estimate_entries`
    pub fn estimate_entries_parallel(&self, entries: &[BatchEntry]) -> BatchReport {
        let results = entries
            .par_iter()
            .enumerate()
            .map(|(i, entry)| self.evaluate(i, entry.as_ref()))
            .collect();
        BatchReport::from_outcomes(results)
    }
}

/// Batch estimate against the built-in factor table
pub fn estimate_batch(items: &[ImpactItem]) -> BatchReport {
    ImpactEstimator::builtin().estimate_batch(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_does_not_abort_batch() {
        let report = estimate_batch(&[
            ImpactItem::new("plastic", 5.0),
            ImpactItem::new("bogus", 1.0),
        ]);
        assert_eq!(report.total_items_processed, 2);
        assert_eq!(report.successful_calculations, 1);
        assert!(report.results[0].is_success());
        match &report.results[1] {
            ItemOutcome::Failure(e) => {
                assert_eq!(e.index, 1);
                assert_eq!(e.kind, ErrorKind::UnknownCategory);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(report.totals.total_co2_saved_kg, 7.5);
        assert_eq!(report.totals.total_waste_diverted_kg, 5.0);
        assert_eq!(report.totals.average_earth_impact_score, 39.34);
    }

    #[test]
    fn test_empty_batch() {
        let report = estimate_batch(&[]);
        assert_eq!(report.total_items_processed, 0);
        assert_eq!(report.successful_calculations, 0);
        assert_eq!(report.totals, BatchTotals::default());
        assert_eq!(report.totals.average_earth_impact_score, 0.0);
    }

    #[test]
    fn test_all_failed_batch_averages_zero() {
        let report = estimate_batch(&[ImpactItem::new("plastic", 0.0), ImpactItem::new("x", 1.0)]);
        assert_eq!(report.successful_calculations, 0);
        assert_eq!(report.totals.average_earth_impact_score, 0.0);
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn test_trees_total_treats_missing_as_zero() {
        let report = estimate_batch(&[
            ImpactItem::new("paper", 17.0),
            ImpactItem::new("wood", 100.0),
            ImpactItem::new("metal", 3.0),
        ]);
        assert_eq!(report.totals.total_trees_saved, 2.0);
        // (paper score + wood score + 100) / 3
        let scores: Vec<f64> = report.results.iter().filter_map(|r| r.report()).map(|r| r.earth_impact_score).collect();
        let expected = round2(scores.iter().sum::<f64>() / 3.0);
        assert_eq!(report.totals.average_earth_impact_score, expected);
    }

    #[test]
    fn test_pre_rejected_entries_keep_their_error() {
        let entries: Vec<BatchEntry> = vec![
            Err(ImpactError::InvalidWeight { weight: None }),
            Ok(ImpactItem::new("glass", 2.0)),
        ];
        let report = ImpactEstimator::builtin().estimate_entries(&entries);
        assert_eq!(report.successful_calculations, 1);
        match &report.results[0] {
            ItemOutcome::Failure(e) => assert_eq!(e.kind, ErrorKind::InvalidWeight),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let labels = ["plastic", "paper", "bogus", "wood", "unknown", "e-waste", "metal"];
        let items: Vec<ImpactItem> = (0..200)
            .map(|i| ImpactItem::new(labels[i % labels.len()], (i % 9) as f64 * 1.25))
            .collect();
        let estimator = ImpactEstimator::builtin();
        assert_eq!(estimator.estimate_batch(&items), estimator.estimate_batch_parallel(&items));
    }

    #[test]
    fn test_failure_json_shape() {
        let report = estimate_batch(&[ImpactItem::new("bogus", 1.0)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["kind"], "unknown_category");
        assert_eq!(json["results"][0]["index"], 0);
        assert!(json["results"][0]["error"].as_str().unwrap().contains("bogus"));
        assert_eq!(json["total_items_processed"], 1);
        assert_eq!(json["totals"]["average_earth_impact_score"], 0.0);
    }
}
