//! Registration surface for dynamically contributed build-rule symbols.
//!
//! The rule-registration collaborator hands the composer one of these tables.
//! Registered symbols sit above the fixed vocabulary in the precedence order,
//! so a registered name may intentionally shadow a builtin; callers state
//! that intent through [`RegisteredSymbols::register_shadowing`], which
//! suppresses the collision warning the composer would otherwise emit.

use std::collections::HashSet;

use girder_dialect::Value;
use indexmap::IndexMap;

use crate::error::RegistrationError;

/// Insertion-ordered table of registered top-level symbols
#[derive(Debug, Clone, Default)]
pub struct RegisteredSymbols {
    symbols: IndexMap<String, Value>,
    acknowledged: HashSet<String>,
}

impl RegisteredSymbols {
    /// Create an empty registration table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol under a new name
    ///
    /// Shadowing a fixed top-level is allowed but will be reported as a
    /// collision warning at composition time.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), RegistrationError> {
        self.insert(name.into(), value, false)
    }

    /// Register a symbol that intentionally shadows a fixed top-level
    pub fn register_shadowing(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), RegistrationError> {
        self.insert(name.into(), value, true)
    }

    fn insert(
        &mut self,
        name: String,
        value: Value,
        acknowledged: bool,
    ) -> Result<(), RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::EmptySymbolName);
        }
        if self.symbols.contains_key(&name) {
            return Err(RegistrationError::DuplicateSymbol { name });
        }
        log::debug!(
            "registering symbol '{}'{}",
            name,
            if acknowledged {
                " (acknowledged shadow)"
            } else {
                ""
            }
        );
        if acknowledged {
            self.acknowledged.insert(name.clone());
        }
        self.symbols.insert(name, value);
        Ok(())
    }

    /// Whether a name was registered with an explicit shadow acknowledgment
    pub fn is_acknowledged(&self, name: &str) -> bool {
        self.acknowledged.contains(name)
    }

    /// The registered symbols in registration order
    pub fn symbols(&self) -> &IndexMap<String, Value> {
        &self.symbols
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
