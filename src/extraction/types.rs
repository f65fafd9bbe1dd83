use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::registry::FunctionSpec;

/// A dynamically typed argument value as returned by the extraction service.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArgValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    /// Booleans, arrays and objects. Never accepted for any declared type.
    Other(serde_json::Value),
}

impl ArgValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Number(_) => "number",
            ArgValue::Text(_) => "string",
            ArgValue::Missing => "missing",
            ArgValue::Other(serde_json::Value::Bool(_)) => "boolean",
            ArgValue::Other(serde_json::Value::Array(_)) => "array",
            ArgValue::Other(serde_json::Value::Object(_)) => "object",
            ArgValue::Other(_) => "unsupported",
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ArgValue::Missing,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => ArgValue::Number(f),
                None => ArgValue::Other(serde_json::Value::Number(n)),
            },
            serde_json::Value::String(s) => ArgValue::Text(s),
            other => ArgValue::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for ArgValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(ArgValue::from)
    }
}

/// Raw, unvalidated arguments for a single function.
pub type RawArguments = HashMap<String, ArgValue>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionRequest<'a> {
    pub text: &'a str,
    pub top_k: u32,
    pub threshold: f64,
}

/// Parameter names to be filled in, keyed by function name.
/// Serialized as `{ fn: { param: null, ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArgumentSchema(BTreeMap<String, BTreeMap<String, serde_json::Value>>);

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema scoped to exactly one function and its declared parameters.
    pub fn for_function(spec: &FunctionSpec) -> Self {
        let mut schema = Self::new();
        schema.insert(spec);
        schema
    }

    pub fn insert(&mut self, spec: &FunctionSpec) {
        let params = spec
            .parameter_names()
            .map(|name| (name.to_string(), serde_json::Value::Null))
            .collect();
        self.0.insert(spec.name.clone(), params);
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn parameters(&self, function: &str) -> Option<Vec<&str>> {
        self.0
            .get(function)
            .map(|params| params.keys().map(|k| k.as_str()).collect())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArgumentsRequest<'a> {
    pub text: &'a str,
    pub functions_args_dict: &'a ArgumentSchema,
}

/// Argument extraction response keyed by function name. Entries are kept as raw JSON so that a
/// malformed entry for one function does not invalidate the others.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ExtractedArguments(HashMap<String, serde_json::Value>);

impl ExtractedArguments {
    pub fn new(entries: HashMap<String, serde_json::Value>) -> Self {
        Self(entries)
    }

    /// The argument mapping for `function`, or None when the entry is absent or not an object.
    pub fn for_function(&self, function: &str) -> Option<RawArguments> {
        match self.0.get(function)? {
            serde_json::Value::Object(map) => Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), ArgValue::from(v.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Extraction service unavailable: {0}")]
    Transport(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ExtractionError {
    /// Connection failures, timeouts and 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            ExtractionError::Transport(_) | ExtractionError::Timeout(_) => true,
            ExtractionError::HttpStatus { status, .. } => *status >= 500,
            ExtractionError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ExtractionError::Timeout(e.to_string())
        } else {
            ExtractionError::Transport(e.to_string())
        }
    }
}
