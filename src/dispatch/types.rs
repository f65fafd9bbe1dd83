use std::fmt;
use thiserror::Error;

use crate::extraction::types::ExtractionError;
use crate::registry::InvocationError;

/// Progress of a single candidate through dispatch. Each stage is attempted once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateStage {
    Selected,
    LookedUp,
    Scoped,
    Extracted,
    Validated,
    Invoked,
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CandidateStage::Selected => "selected",
            CandidateStage::LookedUp => "looked_up",
            CandidateStage::Scoped => "scoped",
            CandidateStage::Extracted => "extracted",
            CandidateStage::Validated => "validated",
            CandidateStage::Invoked => "invoked",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Function selection failed: {0}")]
    Selection(ExtractionError),

    #[error("Function '{0}' not found")]
    UnknownFunction(String),

    #[error("Argument extraction failed for '{function}': {source}")]
    Extraction {
        function: String,
        source: ExtractionError,
    },

    #[error("No argument mapping returned for '{function}'")]
    ArgumentShape { function: String },

    #[error("Invalid argument '{parameter}' for '{function}': {reason}")]
    ArgumentType {
        function: String,
        parameter: String,
        reason: String,
    },

    #[error("Invocation of '{function}' failed: {source}")]
    Invocation {
        function: String,
        source: InvocationError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateResult {
    Invoked {
        function: String,
        value: f64,
    },
    /// `stage` is the last stage the candidate reached before `error`.
    Failed {
        function: String,
        stage: CandidateStage,
        error: DispatchError,
    },
}

impl CandidateResult {
    pub fn function(&self) -> &str {
        match self {
            CandidateResult::Invoked { function, .. } | CandidateResult::Failed { function, .. } => {
                function
            }
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            CandidateResult::Invoked { value, .. } => Some(*value),
            CandidateResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            CandidateResult::Invoked { .. } => None,
            CandidateResult::Failed { error, .. } => Some(error),
        }
    }
}

/// Everything that happened for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub text: String,
    /// Candidates in the order returned by selection.
    pub candidates: Vec<String>,
    /// One entry per dispatched candidate, in candidate order.
    pub results: Vec<CandidateResult>,
    pub selection_error: Option<DispatchError>,
}

impl DispatchOutcome {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            candidates: Vec::new(),
            results: Vec::new(),
            selection_error: None,
        }
    }

    /// (function, value) pairs for successful invocations.
    pub fn values(&self) -> Vec<(&str, f64)> {
        self.results
            .iter()
            .filter_map(|r| r.value().map(|v| (r.function(), v)))
            .collect()
    }

    pub fn errors(&self) -> Vec<&DispatchError> {
        self.selection_error
            .iter()
            .chain(self.results.iter().filter_map(|r| r.error()))
            .collect()
    }

    /// True when nothing was selected and selection did not fail.
    pub fn is_unrecognized(&self) -> bool {
        self.selection_error.is_none() && self.candidates.is_empty()
    }
}
