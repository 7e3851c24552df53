use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::WeightsFormat;
use crate::scoring::Weights;

/// Write the built-in weights to `path` so they can be tuned by hand.
///
/// The format follows the extension (YAML for `.yaml`/`.yml`, JSON
/// otherwise). Refuses to replace an existing file unless `force` is set.
pub fn write_default_weights(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Weights file already exists at {}. Pass --force to overwrite",
            path.display()
        );
    }

    let weights = Weights::default();
    let contents = match WeightsFormat::from_path(path) {
        WeightsFormat::Json => {
            serde_json::to_string_pretty(&weights).context("Failed to serialize weights")? + "\n"
        }
        WeightsFormat::Yaml => serde_saphyr::to_string(&weights)
            .map_err(|e| anyhow::anyhow!("Failed to serialize weights: {}", e))?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write weights to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save weights to {}", path.display()))?;

    tracing::info!("wrote default weights to {}", path.display());
    Ok(())
}
