//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HlsConfig;
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "hls.toml";

const SUPPORTED_RADICES: [u32; 3] = [2, 10, 16];

/// Loads and validates `<project_dir>/hls.toml`.
pub fn load_config(project_dir: &Path) -> Result<HlsConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates an `hls.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<HlsConfig, ConfigError> {
    let config: HlsConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks value ranges that serde cannot express.
pub fn validate_config(config: &HlsConfig) -> Result<(), ConfigError> {
    let radix = config.fixed_point.default_radix;
    if !SUPPORTED_RADICES.contains(&radix) {
        return Err(ConfigError::ValidationError(format!(
            "fixed_point.default_radix must be 2, 10 or 16, got {radix}"
        )));
    }
    let width = config.microcode.max_select_width;
    if width == 0 || width > 32 {
        return Err(ConfigError::ValidationError(format!(
            "microcode.max_select_width must be between 1 and 32, got {width}"
        )));
    }
    Ok(())
}
