//! Settings file loading

use std::path::Path;

use super::{
    ConfigError,
    PolyglotSettings,
};

/// Reads settings from a JSON file and validates them.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and holds valid settings
/// - `Ok(None)`: the file does not exist
/// - `Err(ConfigError)`: read, parse or validation failure
pub fn load_settings(config_path: &Path) -> Result<Option<PolyglotSettings>, ConfigError> {
    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: PolyglotSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(Some(settings))
}
