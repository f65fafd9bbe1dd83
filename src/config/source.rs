use std::env;
use std::path::Path;

use super::constants::DEFAULT_CONFIG_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    Defaults,
}

impl ConfigSource {
    /// `CONFIG_FILE_PATH` when set, else `config.yaml` if present, else built-in defaults.
    pub fn from_env() -> Self {
        match env::var("CONFIG_FILE_PATH") {
            Ok(path) => ConfigSource::File(path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                ConfigSource::File(DEFAULT_CONFIG_PATH.to_string())
            }
            Err(_) => ConfigSource::Defaults,
        }
    }
}
