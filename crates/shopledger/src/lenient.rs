//! Lenient parsing helpers for the persisted inspection blob.
//!
//! Years of hand-edited JSON left cost and quantity fields stored as
//! numbers, numeric strings, nulls, or nothing at all. The read side
//! treats every one of those as a plain amount, falling back to zero,
//! so malformed rows load instead of erroring.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value to a non-negative f64.
///
/// Accepts numbers and numeric strings; null, missing, garbage strings,
/// non-finite values, and negatives all collapse to `0.0`.
pub fn amount_from_value(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    clamp_amount(n)
}

/// Clamps an amount written through the typed API: non-finite or
/// negative input becomes zero. Applied on every numeric write, not
/// just at aggregation time, so totals can never see NaN.
pub fn clamp_amount(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

/// Deserializes an amount field leniently via [`amount_from_value`].
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(amount_from_value).unwrap_or(0.0))
}

/// Deserializes an id that legacy rows stored as either a string or a
/// bare number (early service lines used `Math.random()` ids).
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Deserializes an optional text field, mapping null/missing/non-string
/// to the empty string.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}
