//! Utility modules for impact estimation
//!
//! Contains shared functionality used across metrics and reports:
//! - Normalization: decimal rounding and reference-ratio scoring

pub mod normalization;

// Re-export commonly used functions
pub use normalization::{ratio_score, round2, round_to, MAX_SCORE};
