use thiserror::Error;
use tracing::info;

use super::constants::{base_url_override, timeout_ms_override};
use super::models::Config;
use super::source::ConfigSource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let mut config: Config = serde_yaml::from_str(&contents)?;
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load from the resolved source, then validate.
pub fn load_from_source(source: &ConfigSource) -> Result<Config, ConfigError> {
    let config = match source {
        ConfigSource::File(path) => {
            info!("Loading configuration from {}", path);
            load_config(path)?
        }
        ConfigSource::Defaults => {
            info!("No configuration file found, using defaults");
            let mut config = Config::default();
            apply_env_overrides(&mut config)?;
            config
        }
    };
    super::validation::validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    if let Some(base_url) = base_url_override() {
        config.extractor.base_url = base_url;
    }
    if let Some(timeout_ms) = timeout_ms_override().map_err(|e| ConfigError::Invalid(vec![e]))? {
        config.extractor.timeout_ms = timeout_ms;
    }
    Ok(())
}
