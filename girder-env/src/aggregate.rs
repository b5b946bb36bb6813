//! Builder for the `native` aggregate object.
//!
//! `native` is the single namespace exposed inside manifest environments
//! whose fields are the shared fixed top-levels plus every registered build
//! rule. Manifest-only top-levels never appear among its fields; a
//! registered rule colliding with one is kept out of the aggregate and
//! reported, while still taking part in the top-level precedence merge.

use girder_dialect::{FixedGlobals, Namespace, Value};
use indexmap::IndexMap;

use crate::composer::Context;
use crate::error::{CollisionWarning, CompositionDefect};
use crate::registration::RegisteredSymbols;

/// The composed `native` aggregate and the collisions found building it
#[derive(Debug, Clone, PartialEq)]
pub struct NativeAggregate {
    fields: Namespace,
    warnings: Vec<CollisionWarning>,
}

impl NativeAggregate {
    /// Merge the shared fixed top-levels with the registered symbols
    ///
    /// Registered symbols win over shared fixed fields of the same name.
    /// The final field set is checked against the manifest-only table; a
    /// violation there is a fatal authoring defect, not a runtime condition.
    pub fn build(
        globals: &FixedGlobals,
        registered: &RegisteredSymbols,
    ) -> Result<Self, CompositionDefect> {
        let mut entries: IndexMap<String, Value> = globals.shared_with_native().clone();
        let mut warnings = Vec::new();

        for (name, value) in registered.symbols() {
            if globals.manifest_only().contains_key(name) {
                warnings.push(CollisionWarning::RegisteredCollidesWithManifestOnly {
                    name: name.clone(),
                });
                continue;
            }
            if globals.shared_with_native().contains_key(name) && !registered.is_acknowledged(name)
            {
                warnings.push(CollisionWarning::RegisteredShadowsFixed {
                    name: name.clone(),
                    context: Context::Manifest,
                });
            }
            entries.insert(name.clone(), value.clone());
        }

        for name in entries.keys() {
            if globals.manifest_only().contains_key(name) {
                return Err(CompositionDefect::AggregateFieldShadowsManifestOnly {
                    name: name.clone(),
                });
            }
        }

        Ok(Self {
            fields: Namespace::from_entries(entries),
            warnings,
        })
    }

    /// The aggregate's fields in composition order
    pub fn fields(&self) -> &Namespace {
        &self.fields
    }

    /// Collisions found while building the aggregate
    pub fn warnings(&self) -> &[CollisionWarning] {
        &self.warnings
    }

    /// The aggregate as a bindable environment value
    pub fn to_value(&self) -> Value {
        Value::Namespace(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girder_dialect::{FixedMapping, FunctionSpec};
    use pretty_assertions::assert_eq;

    fn opaque(n: i64) -> Value {
        Value::Integer(n)
    }

    fn synthetic_globals() -> FixedGlobals {
        let shared: FixedMapping = [
            ("glob".to_string(), opaque(1)),
            ("package_name".to_string(), opaque(2)),
        ]
        .into_iter()
        .collect();
        let manifest_only: FixedMapping =
            [("package".to_string(), opaque(3))].into_iter().collect();
        FixedGlobals::from_mappings(shared, manifest_only, FixedMapping::new()).unwrap()
    }

    #[test]
    fn fields_are_shared_toplevels_plus_registered_symbols() {
        let globals = synthetic_globals();
        let mut registered = RegisteredSymbols::new();
        registered
            .register(
                "cc_library",
                Value::Function(FunctionSpec::new("cc_library", vec![], "")),
            )
            .unwrap();

        let aggregate = NativeAggregate::build(&globals, &registered).unwrap();
        assert_eq!(
            aggregate.fields().names(),
            vec!["glob", "package_name", "cc_library"]
        );
        assert!(aggregate.warnings().is_empty());
    }

    #[test]
    fn registered_symbol_replaces_shared_field_of_same_name() {
        let globals = synthetic_globals();
        let mut registered = RegisteredSymbols::new();
        registered.register_shadowing("glob", opaque(99)).unwrap();

        let aggregate = NativeAggregate::build(&globals, &registered).unwrap();
        assert_eq!(aggregate.fields().get("glob"), Some(&opaque(99)));
        assert_eq!(aggregate.fields().len(), 2);
        assert!(aggregate.warnings().is_empty());
    }

    #[test]
    fn unacknowledged_shadow_of_a_shared_field_warns() {
        let globals = synthetic_globals();
        let mut registered = RegisteredSymbols::new();
        registered.register("glob", opaque(99)).unwrap();

        let aggregate = NativeAggregate::build(&globals, &registered).unwrap();
        assert_eq!(aggregate.fields().get("glob"), Some(&opaque(99)));
        assert_eq!(
            aggregate.warnings(),
            &[CollisionWarning::RegisteredShadowsFixed {
                name: "glob".to_string(),
                context: Context::Manifest,
            }]
        );
    }

    #[test]
    fn manifest_only_collisions_stay_out_of_the_aggregate() {
        let globals = synthetic_globals();
        let mut registered = RegisteredSymbols::new();
        registered.register("package", opaque(7)).unwrap();

        let aggregate = NativeAggregate::build(&globals, &registered).unwrap();
        assert!(!aggregate.fields().contains("package"));
        assert_eq!(
            aggregate.warnings(),
            &[CollisionWarning::RegisteredCollidesWithManifestOnly {
                name: "package".to_string()
            }]
        );
    }
}
