//! SAVINGS: LINEAR-SCALING METRICS
//!
//! Diverted mass, CO₂, energy and water savings are each `weight × coefficient`
//! for the item's category. Trees-equivalent applies only to fibre/wood
//! categories and is `weight / kg_per_tree`.
//!
//! Values here are unrounded; rounding happens when the report is built.

use crate::categories::WasteCategory;
use crate::factors::FactorTable;

/// Result of the linear savings calculations (unrounded)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsResult {
    /// Diverted mass equals input mass
    pub waste_diverted_kg: f64,
    pub co2_saved_kg: f64,
    pub energy_saved_kwh: f64,
    pub water_saved_liters: f64,
    /// Present only for paper, cardboard and wood
    pub trees_saved: Option<f64>,
}

/// Calculate the five savings metrics for a validated category and weight
pub fn calculate_savings(category: WasteCategory, weight_kg: f64, table: &FactorTable) -> SavingsResult {
    let factors = table.get(category);

    SavingsResult {
        waste_diverted_kg: weight_kg,
        co2_saved_kg: weight_kg * factors.co2_per_kg,
        energy_saved_kwh: weight_kg * factors.energy_per_kg,
        water_saved_liters: weight_kg * factors.water_per_kg,
        trees_saved: trees_equivalent(category, weight_kg),
    }
}

/// Trees-equivalent of diverted material
///
/// paper/cardboard: 17 kg per tree; wood: 100 kg per tree; otherwise None.
pub fn trees_equivalent(category: WasteCategory, weight_kg: f64) -> Option<f64> {
    category.kg_per_tree().map(|kg_per_tree| weight_kg / kg_per_tree)
}
