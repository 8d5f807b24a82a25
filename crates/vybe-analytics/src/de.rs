//! Lenient field deserializers
//!
//! The analytics API is loose about types: numbers arrive as strings,
//! lists as `null`, flags as missing. These helpers accept any of those
//! and fall back to `None`/empty instead of failing the whole record.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number or numeric string as `f64`
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Number or numeric string as an exact [`Decimal`]
pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    let text = match Value::deserialize(d)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Ok(None),
    };
    Ok(Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok())
}

/// Integer, float, or numeric string as `i64` (floats truncate)
pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    #[allow(clippy::cast_possible_truncation)]
    let from_float = |f: f64| f.is_finite().then_some(f as i64);
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    })
}

/// String, or any scalar rendered as text
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Boolean; anything else is `false`
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

/// List where `null` means empty
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize, Default)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "decimal")]
        d: Option<Decimal>,
        #[serde(default, deserialize_with = "integer")]
        i: Option<i64>,
        #[serde(default, deserialize_with = "text")]
        t: Option<String>,
        #[serde(default, deserialize_with = "flag")]
        f: bool,
        #[serde(default, deserialize_with = "list")]
        l: Vec<u32>,
    }

    #[test]
    fn test_strings_and_numbers_both_accepted() {
        let p: Probe = serde_json::from_value(json!({
            "n": "3.5", "d": 12.25, "i": "42", "t": 7, "f": true, "l": [1, 2]
        }))
        .unwrap();
        assert_eq!(p.n, Some(3.5));
        assert_eq!(p.d, Some(dec!(12.25)));
        assert_eq!(p.i, Some(42));
        assert_eq!(p.t.as_deref(), Some("7"));
        assert!(p.f);
        assert_eq!(p.l, vec![1, 2]);
    }

    #[test]
    fn test_nulls_and_garbage_fall_back() {
        let p: Probe = serde_json::from_value(json!({
            "n": "abc", "d": null, "i": [], "t": null, "f": "yes", "l": null
        }))
        .unwrap();
        assert_eq!(p.n, None);
        assert_eq!(p.d, None);
        assert_eq!(p.i, None);
        assert_eq!(p.t, None);
        assert!(!p.f);
        assert!(p.l.is_empty());

        let empty: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(empty.l.is_empty());
        assert_eq!(empty.i, None);
    }

    #[test]
    fn test_integer_truncates_floats() {
        let p: Probe = serde_json::from_value(json!({"i": 1_700_000_000.0})).unwrap();
        assert_eq!(p.i, Some(1_700_000_000));
    }
}
