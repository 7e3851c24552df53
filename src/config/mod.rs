mod init;

pub use init::write_default_weights;

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::Weights;

/// Environment variable holding a JSON weights override
pub const WEIGHTS_ENV_VAR: &str = "LEAD_SCORING_WEIGHTS_JSON";

/// Weights file consulted when no explicit path is given or it yields nothing
pub const DEFAULT_WEIGHTS_PATH: &str = "config/lead_scoring.json";

/// The layered inputs for [`load_weights`], highest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightSources {
    /// Raw JSON override, normally taken from [`WEIGHTS_ENV_VAR`]
    pub env_json: Option<String>,
    /// Explicit weights file
    pub path: Option<PathBuf>,
    /// Conventional weights file location
    pub default_path: Option<PathBuf>,
}

impl WeightSources {
    /// Capture the environment override and the conventional default path.
    ///
    /// This is the only place the environment is read; the result is
    /// passed explicitly to [`load_weights`].
    pub fn from_env(path: Option<PathBuf>) -> Self {
        Self {
            env_json: std::env::var(WEIGHTS_ENV_VAR)
                .ok()
                .filter(|raw| !raw.trim().is_empty()),
            path,
            default_path: Some(PathBuf::from(DEFAULT_WEIGHTS_PATH)),
        }
    }
}

/// Which layer supplied the effective weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsOrigin {
    Env,
    File(PathBuf),
    DefaultFile(PathBuf),
    Defaults,
}

impl std::fmt::Display for WeightsOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightsOrigin::Env => write!(f, "${}", WEIGHTS_ENV_VAR),
            WeightsOrigin::File(path) => write!(f, "{}", path.display()),
            WeightsOrigin::DefaultFile(path) => write!(f, "{} (default file)", path.display()),
            WeightsOrigin::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Load weights from the first layer that parses.
///
/// Order: env JSON, explicit path, default path, built-in defaults. Each
/// layer is a shallow override of the defaults. A missing file falls
/// through quietly; unreadable or malformed content is logged and skipped.
pub fn load_weights(sources: &WeightSources) -> Weights {
    resolve_weights(sources).0
}

/// Like [`load_weights`], also reporting which layer won.
pub fn resolve_weights(sources: &WeightSources) -> (Weights, WeightsOrigin) {
    if let Some(ref raw) = sources.env_json {
        match parse_weights(raw, WeightsFormat::Json) {
            Ok(weights) => {
                tracing::debug!("loaded weights from ${}", WEIGHTS_ENV_VAR);
                return (weights, WeightsOrigin::Env);
            }
            Err(e) => tracing::warn!(
                "ignoring ${}: {:#}; trying next source",
                WEIGHTS_ENV_VAR,
                e
            ),
        }
    }

    if let Some(ref path) = sources.path {
        if let Some(weights) = try_load_from_path(path) {
            return (weights, WeightsOrigin::File(path.clone()));
        }
    }

    if let Some(ref path) = sources.default_path {
        if let Some(weights) = try_load_from_path(path) {
            return (weights, WeightsOrigin::DefaultFile(path.clone()));
        }
    }

    tracing::debug!("no weights override found, using built-in defaults");
    (Weights::default(), WeightsOrigin::Defaults)
}

fn try_load_from_path(path: &Path) -> Option<Weights> {
    if !path.exists() {
        tracing::debug!("weights file {} not found", path.display());
        return None;
    }

    match read_weights_file(path) {
        Ok(weights) => {
            tracing::debug!("loaded weights from {}", path.display());
            Some(weights)
        }
        Err(e) => {
            tracing::warn!("{:#}; trying next source", e);
            None
        }
    }
}

/// Read and parse a weights file; YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn read_weights_file(path: &Path) -> Result<Weights> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file at {}", path.display()))?;

    parse_weights(&contents, WeightsFormat::from_path(path))
        .with_context(|| format!("Failed to parse weights in {}", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    Json,
    Yaml,
}

impl WeightsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                WeightsFormat::Yaml
            }
            _ => WeightsFormat::Json,
        }
    }
}

/// Parse a weights document. Keys set to null keep their defaults.
pub fn parse_weights(contents: &str, format: WeightsFormat) -> Result<Weights> {
    let mut document: Value = match format {
        WeightsFormat::Json => serde_json::from_str(contents).context("invalid JSON")?,
        WeightsFormat::Yaml => serde_saphyr::from_str(contents)
            .map_err(|e| anyhow::anyhow!("invalid YAML: {}", e))?,
    };

    if let Value::Object(ref mut fields) = document {
        fields.retain(|key, value| {
            if value.is_null() {
                tracing::debug!("weights.{} is null, keeping default", key);
            }
            !value.is_null()
        });
    }

    let weights: Weights =
        serde_json::from_value(document).context("weights must be a mapping of numbers")?;
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn weights_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let (weights, origin) = resolve_weights(&WeightSources::default());
        assert_eq!(weights, Weights::default());
        assert_eq!(origin, WeightsOrigin::Defaults);
    }

    #[test]
    fn test_env_json_wins() {
        let file = weights_file(".json", r#"{"hot_threshold": 90}"#);
        let sources = WeightSources {
            env_json: Some(r#"{"hot_threshold": 60}"#.to_string()),
            path: Some(file.path().to_path_buf()),
            default_path: None,
        };
        let (weights, origin) = resolve_weights(&sources);
        assert_eq!(weights.hot_threshold, 60.0);
        assert_eq!(weights.warm_threshold, 40.0);
        assert_eq!(origin, WeightsOrigin::Env);
    }

    #[test]
    fn test_bad_env_json_falls_through_to_file() {
        let file = weights_file(".json", r#"{"hot_threshold": 90}"#);
        let sources = WeightSources {
            env_json: Some("{not json".to_string()),
            path: Some(file.path().to_path_buf()),
            default_path: None,
        };
        let (weights, origin) = resolve_weights(&sources);
        assert_eq!(weights.hot_threshold, 90.0);
        assert_eq!(origin, WeightsOrigin::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_bad_file_falls_through_to_default_file() {
        let broken = weights_file(".json", "{ oops");
        let fallback = weights_file(".yaml", "employee_max: 1000\n");
        let sources = WeightSources {
            env_json: None,
            path: Some(broken.path().to_path_buf()),
            default_path: Some(fallback.path().to_path_buf()),
        };
        let (weights, origin) = resolve_weights(&sources);
        assert_eq!(weights.employee_max, 1000.0);
        assert_eq!(weights.employee_min, 10.0);
        assert_eq!(
            origin,
            WeightsOrigin::DefaultFile(fallback.path().to_path_buf())
        );
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let sources = WeightSources {
            env_json: None,
            path: Some(PathBuf::from("/no/such/weights.json")),
            default_path: Some(PathBuf::from("/no/such/default.json")),
        };
        assert_eq!(load_weights(&sources), Weights::default());
    }

    #[test]
    fn test_weights_format_from_path() {
        assert_eq!(WeightsFormat::from_path(Path::new("a.yaml")), WeightsFormat::Yaml);
        assert_eq!(WeightsFormat::from_path(Path::new("a.YML")), WeightsFormat::Yaml);
        assert_eq!(WeightsFormat::from_path(Path::new("a.json")), WeightsFormat::Json);
        assert_eq!(WeightsFormat::from_path(Path::new("weights")), WeightsFormat::Json);
    }

    #[test]
    fn test_null_keys_keep_defaults() {
        let weights = parse_weights(
            r#"{"hot_threshold": null, "warm_threshold": 30}"#,
            WeightsFormat::Json,
        )
        .unwrap();
        assert_eq!(weights.hot_threshold, 70.0);
        assert_eq!(weights.warm_threshold, 30.0);

        let weights = parse_weights("hot_threshold: ~\nemployee_max: 500\n", WeightsFormat::Yaml)
            .unwrap();
        assert_eq!(weights.hot_threshold, 70.0);
        assert_eq!(weights.employee_max, 500.0);
    }

    #[test]
    fn test_env_null_threshold_does_not_label_everything_hot() {
        let sources = WeightSources {
            env_json: Some(r#"{"hot_threshold": null}"#.to_string()),
            path: None,
            default_path: None,
        };
        let (weights, origin) = resolve_weights(&sources);
        assert_eq!(origin, WeightsOrigin::Env);
        assert_eq!(
            crate::scoring::priority_label(10, &weights),
            crate::scoring::Priority::Cold
        );
    }

    #[test]
    fn test_read_weights_file_reports_path() {
        let broken = weights_file(".json", "[[[");
        let err = read_weights_file(broken.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse weights"));
    }
}
