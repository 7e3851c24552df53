use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::Lead;

/// Load leads from a JSON file holding an array of objects.
///
/// Entries that are not objects are skipped with a warning.
pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open leads file at {}", path.display()))?;

    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse leads: invalid JSON in {}", path.display()))?;

    parse_leads(value)
        .with_context(|| format!("Failed to load leads from {}", path.display()))
}

/// Turn a parsed JSON document into leads.
pub fn parse_leads(value: Value) -> Result<Vec<Lead>> {
    let Value::Array(entries) = value else {
        anyhow::bail!("expected a JSON array of lead objects");
    };

    let total = entries.len();
    let leads: Vec<Lead> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let lead = Lead::from_value(entry);
            if lead.is_none() {
                tracing::warn!(index, "skipping lead entry that is not an object");
            }
            lead
        })
        .collect();

    tracing::debug!(loaded = leads.len(), total, "parsed leads");
    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_leads_skips_non_objects() {
        let leads = parse_leads(json!([
            {"id": "a1", "name": "Acme"},
            42,
            "nope",
            {"id": "b1"}
        ]))
        .unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name(), Some("Acme"));
    }

    #[test]
    fn test_parse_leads_rejects_non_array() {
        let result = parse_leads(json!({"id": "a1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_leads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Tiny Co", "employee_count": 5}}]"#).unwrap();

        let leads = load_leads(file.path()).unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].number("employee_count"), 5.0);
    }

    #[test]
    fn test_load_leads_missing_file() {
        let result = load_leads(Path::new("/definitely/not/here/leads.json"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to open leads file"));
    }

    #[test]
    fn test_load_leads_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{not json").unwrap();

        let result = load_leads(file.path());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("invalid JSON"));
    }
}
