use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use super::normalize::{to_number, try_parse_amount};

/// Ideal customer profile preferences.
///
/// Built through [`normalize_prefs`]; the scorer accepts no other shape.
/// Empty sets disable the matching bonus, `None` bounds fall back to the
/// revenue band in the weights. A bound of zero or below is kept as given
/// and switches the revenue factor off.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IcpPreferences {
    pub industries: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub states: BTreeSet<String>,
    pub rev_min: Option<f64>,
    pub rev_max: Option<f64>,
}

impl IcpPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.industries = clean_set(industries);
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.countries = clean_set(countries);
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.states = clean_set(states);
        self
    }

    pub fn with_revenue_band(mut self, rev_min: Option<f64>, rev_max: Option<f64>) -> Self {
        self.rev_min = rev_min.filter(|v| v.is_finite());
        self.rev_max = rev_max.filter(|v| v.is_finite());
        self
    }

    /// True when no preference would influence a score.
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
            && self.countries.is_empty()
            && self.states.is_empty()
            && self.rev_min.is_none()
            && self.rev_max.is_none()
    }

    pub fn matches_industry(&self, industry: &str) -> bool {
        !industry.is_empty() && self.industries.contains(industry)
    }

    /// Country or state membership; either is enough.
    pub fn matches_location(&self, country: &str, state: &str) -> bool {
        (!country.is_empty() && self.countries.contains(country))
            || (!state.is_empty() && self.states.contains(state))
    }
}

fn clean_set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build preferences from a loosely-shaped JSON object.
///
/// Accepts `industries`, `countries` and `states` as arrays (or a single
/// comma-separated string) and `rev_min` / `rev_max` as numbers or amount
/// strings. Anything malformed degrades to "no preference" for that key;
/// a non-object input yields empty preferences.
pub fn normalize_prefs(value: &Value) -> IcpPreferences {
    let Some(obj) = value.as_object() else {
        return IcpPreferences::default();
    };

    IcpPreferences {
        industries: string_set(obj.get("industries")),
        countries: string_set(obj.get("countries")),
        states: string_set(obj.get("states")),
        rev_min: revenue_bound(obj.get("rev_min")),
        rev_max: revenue_bound(obj.get("rev_max")),
    }
}

/// Parse a JSON-encoded preferences argument. Invalid JSON means no preferences.
pub fn parse_prefs_arg(raw: &str) -> Option<IcpPreferences> {
    if raw.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<Value>(raw)
        .ok()
        .map(|value| normalize_prefs(&value))
}

fn string_set(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(items)) => clean_set(items.iter().filter_map(scalar_text)),
        Some(Value::String(s)) => clean_set(s.split(',')),
        _ => BTreeSet::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Null or unparseable bounds are not overrides; explicit numbers are.
fn revenue_bound(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => try_parse_amount(s),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Some(to_number(Some(scalar))),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}
