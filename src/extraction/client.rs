use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::response_parser::{
    check_http_status, parse_arguments_response, parse_selection_response,
};
use super::types::{
    ArgumentSchema, ArgumentsRequest, ExtractedArguments, ExtractionError, SelectionRequest,
};
use super::{ArgumentExtractor, FunctionSelector};
use crate::config::constants::DEFAULT_TIMEOUT_MS;
use crate::config::models::{ExtractorConfig, RetryConfig};

pub const EXTRACT_FUNCTIONS_PATH: &str = "/extract_functions";
pub const EXTRACT_ARGUMENTS_PATH: &str = "/extract_arguments";

/// HTTP client for the text-understanding service.
/// Calls `POST {base_url}/extract_functions` and `POST {base_url}/extract_arguments`.
pub struct HttpExtractionClient {
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpExtractionClient {
    pub fn new(base_url: &str) -> Result<Self, ExtractionError> {
        Self::with_timeout(base_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ExtractionError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractionError> {
        let client = Self::with_timeout(&config.base_url, config.timeout())?;
        Ok(client.with_retry(config.retry.clone()))
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path`, retrying transient failures per the retry policy.
    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ExtractionError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;
        loop {
            match self.post_once(&url, body).await {
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        url = %url,
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Extraction request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn post_once<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<String, ExtractionError> {
        let response = self
            .http_client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let response_body = response.text().await?;
        debug!(url = %url, status, body = %response_body, "Extraction service responded");

        check_http_status(status, &response_body)?;
        Ok(response_body)
    }
}

#[async_trait]
impl FunctionSelector for HttpExtractionClient {
    async fn select_functions(
        &self,
        text: &str,
        top_k: u32,
        threshold: f64,
    ) -> Result<Vec<String>, ExtractionError> {
        let request = SelectionRequest {
            text,
            top_k,
            threshold,
        };
        let body = self.post_json(EXTRACT_FUNCTIONS_PATH, &request).await?;
        parse_selection_response(&body)
    }
}

#[async_trait]
impl ArgumentExtractor for HttpExtractionClient {
    async fn extract_arguments(
        &self,
        text: &str,
        schema: &ArgumentSchema,
    ) -> Result<ExtractedArguments, ExtractionError> {
        let request = ArgumentsRequest {
            text,
            functions_args_dict: schema,
        };
        let body = self.post_json(EXTRACT_ARGUMENTS_PATH, &request).await?;
        parse_arguments_response(&body)
    }
}
