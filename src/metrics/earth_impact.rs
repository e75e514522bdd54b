//! EARTH IMPACT SCORE (COMPOSITE)
//!
//! raw = 0.4 × CO₂ saved + 0.3 × energy saved + 0.3 × mass diverted
//!
//! Normalized against the same formula evaluated with metal's coefficients at
//! the same weight. Every term is linear in weight, so the weight cancels and
//! the score is the ratio of the per-kg composites:
//!
//! score = (0.4·c + 0.3·e + 0.3) / (0.4·c_metal + 0.3·e_metal + 0.3) × 100
//!
//! Working per kg keeps the score finite for any valid weight. Metal itself
//! always scores exactly 100.

use crate::categories::WasteCategory;
use crate::factors::{FactorTable, ReferenceFactors};
use crate::utils::ratio_score;

pub const CO2_WEIGHT: f64 = 0.4;
pub const ENERGY_WEIGHT: f64 = 0.3;
pub const DIVERTED_WEIGHT: f64 = 0.3;

/// Result of the composite score calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthImpactResult {
    /// Weighted savings per kg of the item's category
    pub raw_per_kg: f64,
    /// Weighted savings per kg of metal
    pub reference_per_kg: f64,
    /// Score in [0, 100], unrounded
    pub score: f64,
}

/// Weighted combination of the three score inputs
pub fn weighted_impact(co2_saved_kg: f64, energy_saved_kwh: f64, waste_diverted_kg: f64) -> f64 {
    CO2_WEIGHT * co2_saved_kg + ENERGY_WEIGHT * energy_saved_kwh + DIVERTED_WEIGHT * waste_diverted_kg
}

/// Weighted savings of one kg of material with these coefficients
pub fn weighted_per_kg(factors: &ReferenceFactors) -> f64 {
    weighted_impact(factors.co2_per_kg, factors.energy_per_kg, 1.0)
}

/// Score coefficients against a reference row, clamped to 100
pub fn score_against(factors: &ReferenceFactors, reference: &ReferenceFactors) -> f64 {
    ratio_score(weighted_per_kg(factors), weighted_per_kg(reference))
}

/// Calculate the earth impact score for a category
pub fn calculate_earth_impact(category: WasteCategory, table: &FactorTable) -> EarthImpactResult {
    let factors = table.get(category);
    let reference = table.reference();

    EarthImpactResult {
        raw_per_kg: weighted_per_kg(factors),
        reference_per_kg: weighted_per_kg(reference),
        score: score_against(factors, reference),
    }
}
