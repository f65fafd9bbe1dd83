use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::extraction::types::ArgValue;

/// Declared type tag of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Number,
    Integer,
    String,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::String => "string",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub r#type: ParamType,
}

/// Arguments that passed validation against a function's declared parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, ArgValue>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    pub fn number(&self, name: &str) -> Result<f64, InvocationError> {
        match self.0.get(name) {
            Some(ArgValue::Number(value)) => Ok(*value),
            _ => Err(InvocationError::MissingArgument(name.to_string())),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, InvocationError> {
        match self.0.get(name) {
            Some(ArgValue::Text(value)) => Ok(value.as_str()),
            _ => Err(InvocationError::MissingArgument(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ArgValue)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, ArgValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

pub type FunctionImpl = Arc<dyn Fn(&Arguments) -> Result<f64, InvocationError> + Send + Sync>;

/// A callable entry in the registry: name, declared parameters and implementation.
#[derive(Clone)]
pub struct FunctionSpec {
    pub name: String,
    pub parameters: Vec<Parameter>,
    implementation: FunctionImpl,
}

impl FunctionSpec {
    pub fn new<F>(name: &str, parameters: &[(&str, ParamType)], implementation: F) -> Self
    where
        F: Fn(&Arguments) -> Result<f64, InvocationError> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            parameters: parameters
                .iter()
                .map(|(param, ty)| Parameter {
                    name: param.to_string(),
                    r#type: *ty,
                })
                .collect(),
            implementation: Arc::new(implementation),
        }
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    pub fn invoke(&self, args: &Arguments) -> Result<f64, InvocationError> {
        (self.implementation)(args)
    }
}

impl fmt::Debug for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSpec")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvocationError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Function '{0}' is already registered")]
    Duplicate(String),
}
