//! Override substitutions for staged rollout of alternate implementations.
//!
//! The override collaborator replaces the value bound to an existing public
//! name without changing which names are visible. Substitutions sit at the
//! top of the precedence order. Substituting a fixed builtin is the intended
//! use, but during a staged rollout operators want to see it happening, so
//! the composer warns on each unacknowledged substitution of a fixed name;
//! [`OverrideTable::substitute_acknowledged`] silences the warning once the
//! rollout is deliberate policy.

use std::collections::HashSet;

use girder_dialect::Value;
use indexmap::IndexMap;

/// Name-to-replacement-value table applied at the highest precedence
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    substitutions: IndexMap<String, Value>,
    acknowledged: HashSet<String>,
}

impl OverrideTable {
    /// Create an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the value bound to `name`
    ///
    /// Later substitutions for the same name replace earlier ones.
    pub fn substitute(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        log::debug!("override substitution recorded for '{}'", name);
        self.substitutions.insert(name, value);
    }

    /// Substitute a fixed builtin as acknowledged rollout policy
    pub fn substitute_acknowledged(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.acknowledged.insert(name.clone());
        self.substitute(name, value);
    }

    /// Whether a substitution carries an explicit acknowledgment
    pub fn is_acknowledged(&self, name: &str) -> bool {
        self.acknowledged.contains(name)
    }

    /// The substitutions in insertion order
    pub fn substitutions(&self) -> &IndexMap<String, Value> {
        &self.substitutions
    }

    /// Number of substitutions
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// True if no substitution has been recorded
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girder_dialect::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn later_substitutions_replace_earlier_ones() {
        let mut overrides = OverrideTable::new();
        overrides.substitute("glob", Value::Integer(1));
        overrides.substitute("glob", Value::Integer(2));
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.substitutions().get("glob"), Some(&Value::Integer(2)));
    }

    #[test]
    fn acknowledgment_is_tracked_per_name() {
        let mut overrides = OverrideTable::new();
        overrides.substitute_acknowledged("glob", Value::Integer(1));
        overrides.substitute("select", Value::Integer(2));
        assert!(overrides.is_acknowledged("glob"));
        assert!(!overrides.is_acknowledged("select"));
    }
}
