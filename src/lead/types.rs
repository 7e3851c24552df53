use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::scoring::normalize::to_number;
use crate::scoring::Priority;

/// A prospective business contact.
///
/// Leads are sparse and source-dependent, so this wraps the raw JSON object
/// instead of a fixed struct. Accessors never fail: a missing field reads as
/// absent, zero, empty or falsy depending on the accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lead {
    fields: Map<String, Value>,
}

impl Lead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value; `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Builder-style setter, mostly for fixtures and drivers.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// First of `keys` holding a truthy value.
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| is_truthy(value))
    }

    pub fn number(&self, key: &str) -> f64 {
        to_number(self.get(key))
    }

    /// Numeric value of the first truthy field among `keys`, else 0.0.
    pub fn number_of_any(&self, keys: &[&str]) -> f64 {
        to_number(self.first_truthy(keys))
    }

    /// Trimmed textual form of a field; empty when absent or null.
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Display name, if the record carries one.
    pub fn name(&self) -> Option<&str> {
        self.get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl From<Map<String, Value>> for Lead {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// A lead plus its derived score and priority.
///
/// Serializes as the input fields with `score` and `priority` added;
/// stale values of those two keys in the input are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLead {
    pub lead: Lead,
    pub score: u8,
    pub priority: Priority,
}

impl Serialize for ScoredLead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.lead.fields() {
            if key != "score" && key != "priority" {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("score", &self.score)?;
        map.serialize_entry("priority", &self.priority)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_lead() -> Lead {
        Lead::new()
            .with("name", "Acme Robotics")
            .with("employee_count", 0)
            .with("employees", "1.5K")
            .with("industry", "  Manufacturing ")
            .with("email", "")
            .with("phone", Value::Null)
            .with("hiring", true)
            .with("zip", 94107)
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Lead::from_value(json!({"name": "x"})).is_some());
        assert!(Lead::from_value(json!(["x"])).is_none());
        assert!(Lead::from_value(json!("x")).is_none());
    }

    #[test]
    fn test_truthiness() {
        let lead = sample_lead();
        assert!(lead.is_truthy("hiring"));
        assert!(!lead.is_truthy("email"));
        assert!(!lead.is_truthy("phone"));
        assert!(!lead.is_truthy("linkedin"));
        assert!(!lead.is_truthy("employee_count"));
    }

    #[test]
    fn test_number_of_any_skips_falsy_fields() {
        let lead = sample_lead();
        assert_eq!(lead.number_of_any(&["employee_count", "employees"]), 1_500.0);
        assert_eq!(lead.number_of_any(&["revenue_usd", "revenue"]), 0.0);
    }

    #[test]
    fn test_text_trims_and_renders_scalars() {
        let lead = sample_lead();
        assert_eq!(lead.text("industry"), "Manufacturing");
        assert_eq!(lead.text("zip"), "94107");
        assert_eq!(lead.text("country"), "");
        assert_eq!(lead.text("phone"), "");
    }

    #[test]
    fn test_name() {
        assert_eq!(sample_lead().name(), Some("Acme Robotics"));
        assert_eq!(Lead::new().with("name", "  ").name(), None);
    }

    #[test]
    fn test_scored_lead_serializes_with_extra_fields() {
        let scored = ScoredLead {
            lead: Lead::new().with("id", "a1").with("score", 3),
            score: 88,
            priority: Priority::Hot,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value, json!({"id": "a1", "score": 88, "priority": "Hot"}));
    }
}
