use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::constants::{
    DEFAULT_BACKOFF_MS, DEFAULT_BASE_URL, DEFAULT_THRESHOLD, DEFAULT_TIMEOUT_MS, DEFAULT_TOP_K,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub selection: SelectionConfig,
    pub registry: RegistryConfig,
    pub utterances: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry: RetryConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryConfig::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Retry policy for transient extraction failures. `max_retries: 0` means a single attempt.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

impl RetryConfig {
    /// Exponential backoff: `backoff_ms * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    pub top_k: u32,
    pub threshold: f64,
    /// Dispatch every returned candidate, or only the highest ranked one.
    pub dispatch_all_candidates: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
            dispatch_all_candidates: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Also register power, modulus, percentage and square_root.
    pub extended: bool,
}
