pub mod client;
pub mod response_parser;
pub mod types;

use async_trait::async_trait;

use self::types::{ArgumentSchema, ExtractedArguments, ExtractionError};

/// Maps free text to ranked candidate function names.
#[async_trait]
pub trait FunctionSelector: Send + Sync {
    async fn select_functions(
        &self,
        text: &str,
        top_k: u32,
        threshold: f64,
    ) -> Result<Vec<String>, ExtractionError>;
}

/// Fills in argument values for the functions named in `schema`.
#[async_trait]
pub trait ArgumentExtractor: Send + Sync {
    async fn extract_arguments(
        &self,
        text: &str,
        schema: &ArgumentSchema,
    ) -> Result<ExtractedArguments, ExtractionError>;
}
