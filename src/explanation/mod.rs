//! Explanation Module
//!
//! Turns computed savings into everyday equivalents (car kilometres,
//! household-days, bottles, trees) and narrative statements.

pub mod narrative;

pub use narrative::{
    bottle_equivalent, car_km_equivalent, household_days_equivalent, narrate,
};
