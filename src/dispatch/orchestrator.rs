use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::types::{CandidateResult, CandidateStage, DispatchError, DispatchOutcome};
use super::validation::validate_arguments;
use crate::config::models::SelectionConfig;
use crate::extraction::types::ArgumentSchema;
use crate::extraction::{ArgumentExtractor, FunctionSelector};
use crate::registry::FunctionRegistry;

/// Turns free text into function calls: selection, lookup, scoped extraction, validation, invocation.
/// Every step is awaited before the next one starts.
pub struct Dispatcher {
    registry: Arc<FunctionRegistry>,
    selector: Arc<dyn FunctionSelector>,
    extractor: Arc<dyn ArgumentExtractor>,
    selection: SelectionConfig,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<FunctionRegistry>,
        selector: Arc<dyn FunctionSelector>,
        extractor: Arc<dyn ArgumentExtractor>,
        selection: SelectionConfig,
    ) -> Self {
        Self {
            registry,
            selector,
            extractor,
            selection,
        }
    }

    /// Use one client for both selection and argument extraction.
    pub fn with_client<C>(
        registry: Arc<FunctionRegistry>,
        client: Arc<C>,
        selection: SelectionConfig,
    ) -> Self
    where
        C: FunctionSelector + ArgumentExtractor + 'static,
    {
        Self::new(registry, client.clone(), client, selection)
    }

    /// Dispatch utterances one at a time, in order.
    pub async fn dispatch_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            outcomes.push(self.dispatch(text.as_ref()).await);
        }
        outcomes
    }

    pub async fn dispatch(&self, text: &str) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::new(text);

        let candidates = match self
            .selector
            .select_functions(text, self.selection.top_k, self.selection.threshold)
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(text = %text, error = %err, "Function selection failed");
                outcome.selection_error = Some(DispatchError::Selection(err));
                return outcome;
            }
        };

        if candidates.is_empty() {
            info!(text = %text, "No function recognized");
            return outcome;
        }
        debug!(text = %text, candidates = ?candidates, "Functions selected");

        let dispatched = if self.selection.dispatch_all_candidates {
            candidates.len()
        } else {
            1
        };
        for name in candidates.iter().take(dispatched) {
            outcome.results.push(self.dispatch_candidate(text, name).await);
        }
        outcome.candidates = candidates;
        outcome
    }

    async fn dispatch_candidate(&self, text: &str, name: &str) -> CandidateResult {
        let start = Instant::now();
        let mut stage = CandidateStage::Selected;
        let result = self.run_candidate(text, name, &mut stage).await;
        let elapsed = start.elapsed();

        match result {
            Ok(value) => {
                info!(
                    function = %name,
                    value,
                    elapsed_ms = elapsed.as_millis(),
                    "Function invoked"
                );
                CandidateResult::Invoked {
                    function: name.to_string(),
                    value,
                }
            }
            Err(error) => {
                warn!(
                    function = %name,
                    stage = %stage,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Candidate dispatch failed"
                );
                CandidateResult::Failed {
                    function: name.to_string(),
                    stage,
                    error,
                }
            }
        }
    }

    /// Drive one candidate through the stages, leaving `stage` at the last one reached.
    async fn run_candidate(
        &self,
        text: &str,
        name: &str,
        stage: &mut CandidateStage,
    ) -> Result<f64, DispatchError> {
        let spec = self
            .registry
            .lookup(name)
            .ok_or_else(|| DispatchError::UnknownFunction(name.to_string()))?;
        *stage = CandidateStage::LookedUp;

        let schema = ArgumentSchema::for_function(spec);
        *stage = CandidateStage::Scoped;

        let extracted = self
            .extractor
            .extract_arguments(text, &schema)
            .await
            .map_err(|source| DispatchError::Extraction {
                function: name.to_string(),
                source,
            })?;
        let raw = extracted
            .for_function(name)
            .ok_or_else(|| DispatchError::ArgumentShape {
                function: name.to_string(),
            })?;
        *stage = CandidateStage::Extracted;

        let arguments = validate_arguments(spec, &raw)?;
        *stage = CandidateStage::Validated;

        let value = spec
            .invoke(&arguments)
            .map_err(|source| DispatchError::Invocation {
                function: name.to_string(),
                source,
            })?;
        *stage = CandidateStage::Invoked;
        Ok(value)
    }
}
