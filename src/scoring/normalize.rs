use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a raw lead field into a float.
///
/// Numbers pass through, booleans count as 1/0, and strings go through
/// [`parse_amount`]. Absent, null, array and object values read as 0.0.
/// The result is always finite.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_amount(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => 0.0,
    }
}

/// Parse a human-written amount such as "12,345", "$1.2M" or "350k".
///
/// A trailing K/M/B (any case) scales by 1e3/1e6/1e9. Dollar signs and
/// comma group separators are dropped. Anything unparseable is 0.0.
pub fn parse_amount(raw: &str) -> f64 {
    try_parse_amount(raw).unwrap_or(0.0)
}

/// Like [`parse_amount`], but `None` when the text is not an amount.
pub fn try_parse_amount(raw: &str) -> Option<f64> {
    let upper = raw.trim().to_uppercase();

    let (digits, multiplier) = if let Some(rest) = upper.strip_suffix('K') {
        (rest, 1e3)
    } else if let Some(rest) = upper.strip_suffix('M') {
        (rest, 1e6)
    } else if let Some(rest) = upper.strip_suffix('B') {
        (rest, 1e9)
    } else {
        (upper.as_str(), 1.0)
    };

    let cleaned = digits.replace(['$', ','], "");
    let value = cleaned.trim().parse::<f64>().ok()?;
    Some(value * multiplier).filter(|scaled| scaled.is_finite())
}

/// Serde adapter that reads any JSON/YAML scalar through [`to_number`].
///
/// Lets config files spell weights as `25`, `"25"` or `"1M"`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_number(Some(&value)))
}
