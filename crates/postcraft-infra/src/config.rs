//! Global configuration loader for Postcraft.
//!
//! Reads `config.toml` from the data directory (`~/.postcraft/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::Path;

use postcraft_types::config::GlobalConfig;

/// Highest temperature the generation API accepts.
const MAX_TEMPERATURE: f32 = 2.0;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config
///   with the temperature clamped to the accepted range.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            config.temperature = clamp_temperature(config.temperature);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Clamp a configured temperature into `0.0..=2.0`, mapping NaN to the default.
pub fn clamp_temperature(value: f32) -> f32 {
    if value.is_nan() {
        return GlobalConfig::default().temperature;
    }
    value.clamp(0.0, MAX_TEMPERATURE)
}
