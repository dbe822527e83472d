// crates/infra/src/persistence/settings_reader.rs
use std::path::Path;

use year_range_filter_domain::FilterSettings;
use year_range_filter_shared_kernel::{ErrorContext, InfrastructureError, Result};

use super::file_reader::FileReader;

/// Loads filter settings from a `.json` file (or `.yaml`/`.yml` with the
/// `yaml` feature). Missing keys take their defaults.
pub fn load_settings(path: &Path) -> Result<FilterSettings> {
    let text = FileReader::read_to_string(path)?;
    let settings = parse_settings(path, &text)?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in '{}'", path.display()))?;
    Ok(settings)
}

fn parse_settings(path: &Path, text: &str) -> Result<FilterSettings> {
    match FileReader::extension(path).as_str() {
        "json" => Ok(serde_json::from_str(text)?),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(serde_yaml::from_str(text)?),
        extension => Err(InfrastructureError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        }
        .into()),
    }
}
