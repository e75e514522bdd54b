//! Reference Factor Table
//!
//! Per-category coefficients for material diverted from landfill/virgin
//! production:
//! - `co2_per_kg`: kg CO₂ avoided per kg
//! - `energy_per_kg`: kWh saved per kg
//! - `water_per_kg`: litres saved per kg
//!
//! The built-in table is a `static` and never mutated. Alternative tables can
//! be loaded from JSON; they must satisfy the same invariants (complete,
//! positive, metal maximal) because the impact score normalizes against metal.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fs;
use std::path::Path;

use crate::categories::WasteCategory;

/// Coefficients for a single category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceFactors {
    pub co2_per_kg: f64,
    pub energy_per_kg: f64,
    pub water_per_kg: f64,
}

impl ReferenceFactors {
    const fn new(co2_per_kg: f64, energy_per_kg: f64, water_per_kg: f64) -> Self {
        Self { co2_per_kg, energy_per_kg, water_per_kg }
    }

    fn all_positive(&self) -> bool {
        [self.co2_per_kg, self.energy_per_kg, self.water_per_kg]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Complete category → coefficients mapping, indexed by `WasteCategory`
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    factors: [ReferenceFactors; WasteCategory::COUNT],
}

// ============================================================================
// BUILT-IN TABLE
// Row order matches WasteCategory::ALL
// ============================================================================

static BUILTIN: FactorTable = FactorTable {
    factors: [
        ReferenceFactors::new(1.5, 5.0, 90.0),   // plastic
        ReferenceFactors::new(1.1, 4.0, 60.0),   // paper
        ReferenceFactors::new(1.0, 3.5, 50.0),   // cardboard
        ReferenceFactors::new(4.0, 14.0, 120.0), // metal
        ReferenceFactors::new(0.3, 0.7, 5.0),    // glass
        ReferenceFactors::new(0.9, 2.0, 10.0),   // wood
        ReferenceFactors::new(2.0, 6.0, 100.0),  // fabric
        ReferenceFactors::new(2.0, 6.0, 100.0),  // textile
        ReferenceFactors::new(1.8, 7.0, 40.0),   // rubber
        ReferenceFactors::new(0.5, 0.2, 15.0),   // organic
        ReferenceFactors::new(3.5, 12.0, 110.0), // e-waste
        ReferenceFactors::new(0.8, 2.5, 30.0),   // mixed
        ReferenceFactors::new(0.5, 1.5, 20.0),   // unknown
    ],
};

impl FactorTable {
    /// Process-wide default table
    pub fn builtin() -> &'static FactorTable {
        &BUILTIN
    }

    /// Coefficients for a category
    pub fn get(&self, category: WasteCategory) -> &ReferenceFactors {
        &self.factors[category.index()]
    }

    /// Coefficients of the normalization reference (metal)
    pub fn reference(&self) -> &ReferenceFactors {
        self.get(WasteCategory::Metal)
    }

    /// Iterate `(category, factors)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, &ReferenceFactors)> + '_ {
        WasteCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Load a replacement table from a JSON file
    ///
    /// Format: `{"plastic": {"co2_per_kg": 1.5, "energy_per_kg": 5, "water_per_kg": 90}, ...}`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read factor table: {:?}", path))?;

        let table = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid factor table: {:?}", path))?;

        tracing::info!("Loaded factor table from {:?}", path);
        Ok(table)
    }

    /// Parse and validate a table from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: FxHashMap<String, ReferenceFactors> = serde_json::from_str(json)
            .with_context(|| "Failed to parse factor table JSON")?;
        Self::from_entries(entries)
    }

    /// Build a table from label-keyed entries
    ///
    /// Every category must be present exactly once (labels are normalized the
    /// same way request labels are), with positive finite coefficients.
    pub fn from_entries(entries: FxHashMap<String, ReferenceFactors>) -> Result<Self> {
        let mut slots: [Option<ReferenceFactors>; WasteCategory::COUNT] = [None; WasteCategory::COUNT];

        for (label, factors) in entries {
            let category = WasteCategory::parse(&label)
                .map_err(|_| anyhow::anyhow!("Unknown category '{}' in factor table", label))?;
            if slots[category.index()].replace(factors).is_some() {
                anyhow::bail!("Duplicate entry for '{}' in factor table", category);
            }
        }

        let mut factors = [ReferenceFactors::new(0.0, 0.0, 0.0); WasteCategory::COUNT];
        for category in WasteCategory::ALL {
            factors[category.index()] = slots[category.index()]
                .ok_or_else(|| anyhow::anyhow!("Factor table is missing category '{}'", category))?;
        }

        let table = Self { factors };
        table.validate()?;
        Ok(table)
    }

    /// Check the table invariants
    ///
    /// 1. Every coefficient is finite and > 0
    /// 2. Metal holds the maximum of each coefficient (score reference)
    pub fn validate(&self) -> Result<()> {
        for (category, factors) in self.iter() {
            if !factors.all_positive() {
                anyhow::bail!("Category '{}' has a non-positive or non-finite coefficient: {:?}", category, factors);
            }
        }

        let metal = self.reference();
        for (category, factors) in self.iter() {
            if factors.co2_per_kg > metal.co2_per_kg
                || factors.energy_per_kg > metal.energy_per_kg
                || factors.water_per_kg > metal.water_per_kg
            {
                anyhow::bail!(
                    "Category '{}' exceeds metal coefficients ({:?} > {:?}); metal must be the maximum",
                    category, factors, metal
                );
            }
        }

        Ok(())
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl Serialize for FactorTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WasteCategory::COUNT))?;
        for (category, factors) in self.iter() {
            map.serialize_entry(category.as_str(), factors)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_json() -> serde_json::Value {
        serde_json::to_value(FactorTable::builtin()).unwrap()
    }

    #[test]
    fn test_builtin_table_is_valid() {
        FactorTable::builtin().validate().unwrap();
    }

    #[test]
    fn test_builtin_fixed_values() {
        let table = FactorTable::builtin();
        assert_eq!(*table.get(WasteCategory::Plastic), ReferenceFactors::new(1.5, 5.0, 90.0));
        assert_eq!(table.reference().co2_per_kg, 4.0);
        assert_eq!(table.reference().energy_per_kg, 14.0);
    }

    #[test]
    fn test_fabric_and_textile_share_coefficients() {
        let table = FactorTable::builtin();
        assert_eq!(table.get(WasteCategory::Fabric), table.get(WasteCategory::Textile));
    }

    #[test]
    fn test_metal_is_maximal() {
        let table = FactorTable::builtin();
        let metal = table.reference();
        for (_, f) in table.iter() {
            assert!(f.co2_per_kg <= metal.co2_per_kg);
            assert!(f.energy_per_kg <= metal.energy_per_kg);
            assert!(f.water_per_kg <= metal.water_per_kg);
        }
    }

    #[test]
    fn test_serializes_every_label() {
        let json = builtin_json();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), WasteCategory::COUNT);
        assert_eq!(obj["e-waste"]["co2_per_kg"], 3.5);
    }

    #[test]
    fn test_from_json_round_trips_builtin() {
        let json = builtin_json().to_string();
        let table = FactorTable::from_json_str(&json).unwrap();
        assert_eq!(&table, FactorTable::builtin());
    }

    #[test]
    fn test_load_round_trips_builtin_file() {
        let path = std::env::temp_dir().join(format!("waste_impact_factors_{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string_pretty(FactorTable::builtin()).unwrap()).unwrap();

        let table = FactorTable::load(&path);
        fs::remove_file(&path).ok();

        assert_eq!(&table.unwrap(), FactorTable::builtin());
    }

    #[test]
    fn test_load_reports_invalid_file() {
        let path = std::env::temp_dir().join(format!("waste_impact_bad_factors_{}.json", std::process::id()));
        fs::write(&path, r#"{"plastic": {"co2_per_kg": 1.5}}"#).unwrap();

        let err = FactorTable::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(err.to_string().contains("Invalid factor table"));
    }

    #[test]
    fn test_rejects_missing_category() {
        let mut json = builtin_json();
        json.as_object_mut().unwrap().remove("wood");
        let err = FactorTable::from_json_str(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("wood"));
    }

    #[test]
    fn test_rejects_unknown_label() {
        let mut json = builtin_json();
        json["styrofoam"] = serde_json::json!({"co2_per_kg": 1.0, "energy_per_kg": 1.0, "water_per_kg": 1.0});
        assert!(FactorTable::from_json_str(&json.to_string()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_after_normalization() {
        let mut json = builtin_json();
        let plastic = json["plastic"].clone();
        json["Plastic"] = plastic;
        let err = FactorTable::from_json_str(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_rejects_non_positive_coefficient() {
        let mut json = builtin_json();
        json["glass"]["water_per_kg"] = serde_json::json!(0.0);
        assert!(FactorTable::from_json_str(&json.to_string()).is_err());
    }

    #[test]
    fn test_rejects_category_above_metal() {
        let mut json = builtin_json();
        json["rubber"]["energy_per_kg"] = serde_json::json!(20.0);
        let err = FactorTable::from_json_str(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("metal"));
    }
}
