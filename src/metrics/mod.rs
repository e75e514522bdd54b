//! Metric modules for impact estimation
//!
//! - `savings`: the five linear-scaling calculations
//! - `earth_impact`: composite score normalized against metal

pub mod savings;
pub mod earth_impact;

// Re-export metric functions
pub use savings::{calculate_savings, trees_equivalent, SavingsResult};
pub use earth_impact::{calculate_earth_impact, score_against, weighted_impact, weighted_per_kg, EarthImpactResult};
