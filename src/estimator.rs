//! Impact Estimator - Main coordinator for single-item estimates
//!
//! Validates the input, runs the savings and earth impact metrics, generates
//! the narrative, and rounds everything into an `ImpactReport`.
//!
//! Pipeline:
//! 1. Validate weight (finite, > 0)
//! 2. Normalize + resolve category
//! 3. Savings metrics (unrounded), rejecting weights whose savings overflow
//! 4. Earth impact score from per-kg coefficients
//! 5. Narrative
//! 6. Round reported fields to 2 decimals

use serde::{Deserialize, Serialize};

use crate::categories::WasteCategory;
use crate::error::ImpactError;
use crate::explanation::{bottle_equivalent, car_km_equivalent, household_days_equivalent, narrate};
use crate::factors::FactorTable;
use crate::metrics::{calculate_earth_impact, calculate_savings, SavingsResult};
use crate::utils::round2;

/// Estimated environmental benefit of diverting one waste item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub waste_type: WasteCategory,
    pub waste_diverted_kg: f64,
    pub co2_saved_kg: f64,
    pub energy_saved_kwh: f64,
    pub water_saved_liters: f64,
    /// `null` unless the category is paper, cardboard or wood
    pub trees_saved: Option<f64>,
    /// 0-100, relative to the same mass of metal
    pub earth_impact_score: f64,
    pub human_readable_impact: Vec<String>,
}

/// Stateless estimator bound to a reference factor table
#[derive(Debug, Clone, Copy)]
pub struct ImpactEstimator<'t> {
    table: &'t FactorTable,
}

impl ImpactEstimator<'static> {
    /// Estimator over the built-in factor table
    pub fn builtin() -> Self {
        Self { table: FactorTable::builtin() }
    }
}

impl Default for ImpactEstimator<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> ImpactEstimator<'t> {
    pub fn new(table: &'t FactorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t FactorTable {
        self.table
    }

    /// Estimate the impact of a raw classifier label and weight
    ///
    /// Weight is checked before the category, so an item with both problems
    /// reports `InvalidWeight`.
    pub fn estimate(&self, waste_type: &str, weight_kg: f64) -> Result<ImpactReport, ImpactError> {
        validate_weight(weight_kg)?;
        let category = WasteCategory::parse(waste_type).map_err(|e| {
            tracing::debug!("Rejected waste type '{}'", waste_type);
            e
        })?;
        self.estimate_category(category, weight_kg)
    }

    /// Estimate for an already-resolved category
    pub fn estimate_category(&self, category: WasteCategory, weight_kg: f64) -> Result<ImpactReport, ImpactError> {
        validate_weight(weight_kg)?;

        let savings = calculate_savings(category, weight_kg, self.table);
        check_representable(weight_kg, &savings)?;
        let impact = calculate_earth_impact(category, self.table);

        let human_readable_impact = narrate(
            category,
            savings.waste_diverted_kg,
            savings.co2_saved_kg,
            savings.energy_saved_kwh,
            savings.water_saved_liters,
            savings.trees_saved,
        );

        Ok(ImpactReport {
            waste_type: category,
            waste_diverted_kg: round2(savings.waste_diverted_kg),
            co2_saved_kg: round2(savings.co2_saved_kg),
            energy_saved_kwh: round2(savings.energy_saved_kwh),
            water_saved_liters: round2(savings.water_saved_liters),
            trees_saved: savings.trees_saved.map(round2),
            earth_impact_score: round2(impact.score),
            human_readable_impact,
        })
    }
}

fn validate_weight(weight_kg: f64) -> Result<(), ImpactError> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(())
    } else {
        tracing::debug!("Rejected weight {}", weight_kg);
        Err(ImpactError::InvalidWeight { weight: Some(weight_kg) })
    }
}

/// Every reported number, narrative equivalents included, must be finite
fn check_representable(weight_kg: f64, savings: &SavingsResult) -> Result<(), ImpactError> {
    let derived = [
        savings.co2_saved_kg,
        savings.energy_saved_kwh,
        savings.water_saved_liters,
        savings.trees_saved.unwrap_or(0.0),
        car_km_equivalent(savings.co2_saved_kg),
        household_days_equivalent(savings.energy_saved_kwh),
        bottle_equivalent(savings.water_saved_liters),
    ];

    if derived.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        tracing::debug!("Rejected weight {}: savings overflow", weight_kg);
        Err(ImpactError::InvalidWeight { weight: Some(weight_kg) })
    }
}

/// Estimate against the built-in factor table
pub fn estimate(waste_type: &str, weight_kg: f64) -> Result<ImpactReport, ImpactError> {
    ImpactEstimator::builtin().estimate(waste_type, weight_kg)
}
