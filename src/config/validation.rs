use super::constants::MAX_RETRIES_LIMIT;
use super::models::Config;

/// Validates a loaded Config.
/// Returns Ok(()) if valid, or Err(Vec<String>) with a list of error messages if invalid.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let base_url = config.extractor.base_url.trim();
    if base_url.is_empty() {
        errors.push("Extractor base_url must not be empty.".to_string());
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(format!(
            "Extractor base_url '{base_url}' must start with http:// or https://."
        ));
    }

    if config.extractor.timeout_ms == 0 {
        errors.push("Extractor timeout_ms must be greater than zero.".to_string());
    }

    if config.extractor.retry.max_retries > MAX_RETRIES_LIMIT {
        errors.push(format!(
            "Extractor retry.max_retries {} exceeds the limit of {MAX_RETRIES_LIMIT}.",
            config.extractor.retry.max_retries
        ));
    }

    if config.selection.top_k == 0 {
        errors.push("Selection top_k must be at least 1.".to_string());
    }

    let threshold = config.selection.threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(format!(
            "Selection threshold {threshold} must be between 0.0 and 1.0."
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
