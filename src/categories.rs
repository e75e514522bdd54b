//! Waste Categories
//!
//! Closed set of material classifications that drive which reference
//! factors apply. Classifier output arrives as free-form text; it is
//! normalized (trimmed + lowercased) once at the edge and converted to
//! `WasteCategory` for everything downstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImpactError;

/// Material classification of a waste item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteCategory {
    Plastic,
    Paper,
    Cardboard,
    Metal,
    Glass,
    Wood,
    Fabric,
    // Same coefficients as Fabric, but a separate label callers may send
    Textile,
    Rubber,
    Organic,
    EWaste,
    Mixed,
    Unknown,
}

impl WasteCategory {
    pub const COUNT: usize = 13;

    /// Every category, in reference table order
    pub const ALL: [WasteCategory; Self::COUNT] = [
        WasteCategory::Plastic,
        WasteCategory::Paper,
        WasteCategory::Cardboard,
        WasteCategory::Metal,
        WasteCategory::Glass,
        WasteCategory::Wood,
        WasteCategory::Fabric,
        WasteCategory::Textile,
        WasteCategory::Rubber,
        WasteCategory::Organic,
        WasteCategory::EWaste,
        WasteCategory::Mixed,
        WasteCategory::Unknown,
    ];

    /// Canonical label (as accepted by `parse` and emitted in reports)
    pub fn as_str(self) -> &'static str {
        match self {
            WasteCategory::Plastic => "plastic",
            WasteCategory::Paper => "paper",
            WasteCategory::Cardboard => "cardboard",
            WasteCategory::Metal => "metal",
            WasteCategory::Glass => "glass",
            WasteCategory::Wood => "wood",
            WasteCategory::Fabric => "fabric",
            WasteCategory::Textile => "textile",
            WasteCategory::Rubber => "rubber",
            WasteCategory::Organic => "organic",
            WasteCategory::EWaste => "e-waste",
            WasteCategory::Mixed => "mixed",
            WasteCategory::Unknown => "unknown",
        }
    }

    /// Position in the reference table
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Normalize a raw classifier label and resolve it to a category.
    ///
    /// Unrecognized labels are rejected rather than coerced to `Unknown`;
    /// callers pre-classify into `unknown` themselves when uncertain.
    pub fn parse(raw: &str) -> Result<Self, ImpactError> {
        let normalized = raw.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or(ImpactError::UnknownCategory { waste_type: normalized })
    }

    /// Categories with a trees-equivalent, and the kg of material per tree
    pub fn kg_per_tree(self) -> Option<f64> {
        match self {
            WasteCategory::Paper | WasteCategory::Cardboard => Some(17.0),
            WasteCategory::Wood => Some(100.0),
            _ => None,
        }
    }

    /// Comma-separated list of every valid label (used in error messages)
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(WasteCategory::parse("  Plastic ").unwrap(), WasteCategory::Plastic);
        assert_eq!(WasteCategory::parse("E-WASTE").unwrap(), WasteCategory::EWaste);
        assert_eq!("metal".parse::<WasteCategory>().unwrap(), WasteCategory::Metal);
    }

    #[test]
    fn test_parse_rejects_unrecognized() {
        match WasteCategory::parse(" Bogus ") {
            Err(ImpactError::UnknownCategory { waste_type }) => assert_eq!(waste_type, "bogus"),
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
        assert!(WasteCategory::parse("").is_err());
        // No aliasing: "ewaste" is not "e-waste"
        assert!(WasteCategory::parse("ewaste").is_err());
    }

    #[test]
    fn test_fabric_and_textile_are_distinct() {
        assert_ne!(WasteCategory::parse("fabric").unwrap(), WasteCategory::parse("textile").unwrap());
    }

    #[test]
    fn test_labels_round_trip_through_index() {
        for (i, category) in WasteCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(WasteCategory::parse(category.as_str()).unwrap(), *category);
        }
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&WasteCategory::EWaste).unwrap();
        assert_eq!(json, "\"e-waste\"");
        let back: WasteCategory = serde_json::from_str("\"textile\"").unwrap();
        assert_eq!(back, WasteCategory::Textile);
    }

    #[test]
    fn test_kg_per_tree() {
        assert_eq!(WasteCategory::Paper.kg_per_tree(), Some(17.0));
        assert_eq!(WasteCategory::Cardboard.kg_per_tree(), Some(17.0));
        assert_eq!(WasteCategory::Wood.kg_per_tree(), Some(100.0));
        assert_eq!(WasteCategory::Metal.kg_per_tree(), None);
        assert_eq!(WasteCategory::Unknown.kg_per_tree(), None);
    }
}
