//! JSON request boundary
//!
//! Request bodies come from form input and classifier output, so they are
//! read leniently from `serde_json::Value` and mapped onto the error taxonomy
//! instead of failing deserialization wholesale:
//! - weight missing / non-numeric → `InvalidWeight`
//! - waste type missing / non-string → `UnknownCategory` (empty label)
//! - body or `items` of the wrong shape → `InvalidInput`

use serde_json::Value;

use crate::batch::{BatchEntry, ImpactItem};
use crate::error::ImpactError;

/// Read a single `{waste_type, weight_kg}` object
///
/// Numeric strings are accepted for `weight_kg` (form fields arrive as text).
/// Range checks on the weight happen in the estimator.
pub fn parse_item(value: &Value) -> BatchEntry {
    let obj = value
        .as_object()
        .ok_or_else(|| ImpactError::invalid_input("item must be a JSON object"))?;

    let weight_kg = match obj.get("weight_kg") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(ImpactError::InvalidWeight { weight: None })?;

    let waste_type = match obj.get("waste_type") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(ImpactError::UnknownCategory { waste_type: String::new() }),
    };

    Ok(ImpactItem { waste_type, weight_kg })
}

/// Read a batch body: `{"items": [...]}` or a bare array
///
/// A body that is not a sequence fails the whole call with `InvalidInput`;
/// malformed items become per-item errors.
pub fn parse_batch(value: &Value) -> Result<Vec<BatchEntry>, ImpactError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("items") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(ImpactError::invalid_input("`items` must be an array")),
            None => return Err(ImpactError::invalid_input("missing `items` array")),
        },
        _ => return Err(ImpactError::invalid_input("batch body must be an array or an object with `items`")),
    };

    Ok(items.iter().map(parse_item).collect())
}

/// Parse raw request bytes as JSON
pub fn parse_json(body: &[u8]) -> Result<Value, ImpactError> {
    serde_json::from_slice(body).map_err(|e| ImpactError::invalid_input(format!("malformed JSON: {}", e)))
}
