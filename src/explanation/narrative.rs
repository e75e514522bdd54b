use crate::categories::WasteCategory;
use crate::utils::{round2, round_to};

/// kg CO₂ emitted per km by an average car
pub const CO2_KG_PER_CAR_KM: f64 = 0.21;
/// kWh drawn per day by an average household
pub const HOUSEHOLD_KWH_PER_DAY: f64 = 5.0;
/// Litres in a standard bottle
pub const LITRES_PER_BOTTLE: f64 = 0.5;

/// Car kilometres not driven for a CO₂ saving (1 decimal)
pub fn car_km_equivalent(co2_saved_kg: f64) -> f64 {
    round_to(co2_saved_kg / CO2_KG_PER_CAR_KM, 1)
}

/// Household-days powered by an energy saving (1 decimal)
pub fn household_days_equivalent(energy_saved_kwh: f64) -> f64 {
    round_to(energy_saved_kwh / HOUSEHOLD_KWH_PER_DAY, 1)
}

/// Standard bottles filled by a water saving (nearest whole bottle)
pub fn bottle_equivalent(water_saved_liters: f64) -> f64 {
    round_to(water_saved_liters / LITRES_PER_BOTTLE, 0)
}

/// Generate the human-readable impact statements
///
/// Always CO₂, energy and water (in that order). A fourth statement follows
/// when there is a trees-equivalent, or a caveat when the category is
/// `unknown`; otherwise the list has three entries.
pub fn narrate(
    category: WasteCategory,
    weight_kg: f64,
    co2_saved_kg: f64,
    energy_saved_kwh: f64,
    water_saved_liters: f64,
    trees_saved: Option<f64>,
) -> Vec<String> {
    let mut statements = Vec::with_capacity(4);

    statements.push(format!(
        "Recycling {} kg of {} avoids {} kg of CO₂ emissions, the same as not driving a car for {} km.",
        round2(weight_kg),
        category,
        round2(co2_saved_kg),
        car_km_equivalent(co2_saved_kg)
    ));

    statements.push(format!(
        "It saves {} kWh of energy, enough to power an average household for {} days.",
        round2(energy_saved_kwh),
        household_days_equivalent(energy_saved_kwh)
    ));

    statements.push(format!(
        "It saves {} litres of water, about {} standard bottles.",
        round2(water_saved_liters),
        bottle_equivalent(water_saved_liters)
    ));

    if let Some(trees) = trees_saved {
        statements.push(format!(
            "Diverting this {} spares the equivalent of {} trees.",
            category,
            round2(trees)
        ));
    } else if category == WasteCategory::Unknown {
        statements.push(
            "The material could not be identified, so these figures are approximate averages. \
             Classifying the item gives a more accurate estimate."
                .to_string(),
        );
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalents() {
        assert_eq!(car_km_equivalent(7.5), 35.7);
        assert_eq!(household_days_equivalent(25.0), 5.0);
        assert_eq!(household_days_equivalent(12.34), 2.5);
        assert_eq!(bottle_equivalent(450.0), 900.0);
        assert_eq!(bottle_equivalent(0.3), 1.0);
        assert_eq!(bottle_equivalent(0.2), 0.0);
    }

    #[test]
    fn test_three_statements_without_trees() {
        let lines = narrate(WasteCategory::Plastic, 5.0, 7.5, 25.0, 450.0, None);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("5 kg of plastic"));
        assert!(lines[0].contains("35.7 km"));
        assert!(lines[1].contains("25 kWh"));
        assert!(lines[1].contains("5 days"));
        assert!(lines[2].contains("450 litres"));
        assert!(lines[2].contains("900 standard bottles"));
    }

    #[test]
    fn test_trees_statement_is_fourth() {
        let lines = narrate(WasteCategory::Paper, 17.0, 18.7, 68.0, 1020.0, Some(1.0));
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("1 trees"));
    }

    #[test]
    fn test_unknown_gets_caveat() {
        let lines = narrate(WasteCategory::Unknown, 2.0, 1.0, 3.0, 40.0, None);
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("approximate"));
    }
}
