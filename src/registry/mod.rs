pub mod calculator;
pub mod types;

use std::collections::HashMap;

use tracing::debug;

use crate::config::models::RegistryConfig;
pub use types::{
    Arguments, FunctionImpl, FunctionSpec, InvocationError, ParamType, Parameter, RegistryError,
};

/// Name → FunctionSpec lookup. Built once at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionSpec>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four arithmetic builtins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for spec in calculator::builtins() {
            registry.functions.insert(spec.name.clone(), spec);
        }
        registry
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::with_builtins();
        if config.extended {
            for spec in calculator::extended() {
                registry.register(spec)?;
            }
        }
        debug!(functions = registry.len(), "Function registry built");
        Ok(registry)
    }

    pub fn register(&mut self, spec: FunctionSpec) -> Result<(), RegistryError> {
        if self.functions.contains_key(&spec.name) {
            return Err(RegistryError::Duplicate(spec.name));
        }
        self.functions.insert(spec.name.clone(), spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
