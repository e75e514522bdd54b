//! Normalization Utilities
//!
//! Decimal rounding for reported values and the reference-ratio transform
//! behind the 0-100 earth impact score.

/// Upper bound of the impact score scale
pub const MAX_SCORE: f64 = 100.0;

/// Round to a fixed number of decimal places (half away from zero)
///
/// All reported values go through this exactly once, at output. Intermediate
/// calculations use unrounded values. Values too large to scale by
/// `10^decimals` are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Shorthand for the 2-decimal rounding used by every report field
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Score a raw value as a percentage of a reference maximum, clamped to 100
///
/// The reference is built from the maximal category, so `raw <= reference_max`
/// in practice; the clamp only guards against a table that breaks that.
/// A non-positive reference yields 0.
pub fn ratio_score(raw: f64, reference_max: f64) -> f64 {
    if reference_max <= 0.0 || !reference_max.is_finite() {
        return 0.0;
    }
    ((raw / reference_max) * MAX_SCORE).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(39.344262, 2), 39.34);
        assert_eq!(round_to(35.714285, 1), 35.7);
        assert_eq!(round_to(900.4, 0), 900.0);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round2(0.294117647), 0.29);
    }

    #[test]
    fn test_round_to_near_f64_max() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round_to(f64::MAX, 1), f64::MAX);
        assert_eq!(round_to(-1e307, 2), -1e307);
        assert!(round2(9e306).is_finite());
    }

    #[test]
    fn test_ratio_score() {
        assert_relative_eq!(ratio_score(12.0, 30.5), 39.3442, epsilon = 0.0001);
        assert_eq!(ratio_score(30.5, 30.5), 100.0);
    }

    #[test]
    fn test_ratio_score_clamps() {
        assert_eq!(ratio_score(40.0, 30.5), 100.0);
    }

    #[test]
    fn test_ratio_score_degenerate_reference() {
        assert_eq!(ratio_score(5.0, 0.0), 0.0);
        assert_eq!(ratio_score(5.0, f64::NAN), 0.0);
    }
}
