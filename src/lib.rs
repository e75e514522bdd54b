//! Waste Impact Estimator
//!
//! Converts a waste classification and weight into an environmental impact
//! report: CO₂, energy and water saved, trees-equivalent, a 0-100 earth
//! impact score, and narrative statements. Batch mode estimates many items
//! independently and aggregates the successful ones.
//!
//! Module structure:
//! - `categories`: closed waste category set and label normalization
//! - `factors`: reference factor table (built-in + JSON loading)
//! - `metrics/`: savings and earth impact score calculations
//! - `explanation/`: everyday equivalents and narrative statements
//! - `estimator`: single-item pipeline producing `ImpactReport`
//! - `batch`: sequential and parallel batch estimation
//! - `request`: lenient JSON request parsing
//! - `api_server`: Axum HTTP API (feature `api`)

pub mod categories;
pub mod error;
pub mod factors;
pub mod utils;
pub mod metrics;
pub mod explanation;
pub mod estimator;
pub mod batch;
pub mod request;
pub mod config;
pub mod api_server;

// Re-export commonly used types
pub use categories::WasteCategory;
pub use error::{ErrorKind, ImpactError};
pub use factors::{FactorTable, ReferenceFactors};
pub use estimator::{estimate, ImpactEstimator, ImpactReport};
pub use batch::{estimate_batch, BatchEntry, BatchReport, BatchTotals, ImpactItem, ItemError, ItemOutcome};

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
