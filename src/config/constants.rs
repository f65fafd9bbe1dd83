use std::env;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOP_K: u32 = 1;
pub const DEFAULT_THRESHOLD: f64 = 0.45;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_BACKOFF_MS: u64 = 200;
pub const MAX_RETRIES_LIMIT: u32 = 10;

pub fn base_url_override() -> Option<String> {
    env::var("EXTRACTOR_BASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// `EXTRACTOR_TIMEOUT_MS`, if set. A value that is not a whole number of milliseconds is an error.
pub fn timeout_ms_override() -> Result<Option<u64>, String> {
    match env::var("EXTRACTOR_TIMEOUT_MS") {
        Ok(ms) => ms.trim().parse().map(Some).map_err(|e| {
            format!("EXTRACTOR_TIMEOUT_MS '{ms}' is not a valid number of milliseconds: {e}")
        }),
        Err(_) => Ok(None),
    }
}
