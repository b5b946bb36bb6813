//! Collision-warning behavior
//!
//! Warnings exist for operator visibility; none of them ever blocks
//! composition.

use girder_dialect::{FixedGlobals, FixedMapping, Value};
use pretty_assertions::assert_eq;

use crate::composer::{Context, EnvironmentComposer};
use crate::error::CollisionWarning;
use crate::overrides::OverrideTable;
use crate::registration::RegisteredSymbols;

fn opaque(n: i64) -> Value {
    Value::Integer(n)
}

fn synthetic_globals() -> FixedGlobals {
    let shared: FixedMapping = [("glob".to_string(), opaque(1))].into_iter().collect();
    let manifest_only: FixedMapping = [("package".to_string(), opaque(2))].into_iter().collect();
    let extension: FixedMapping = [("rule".to_string(), opaque(3))].into_iter().collect();
    FixedGlobals::from_mappings(shared, manifest_only, extension).unwrap()
}

#[test]
fn unacknowledged_registered_shadow_warns_but_composes() {
    let mut registered = RegisteredSymbols::new();
    registered.register("rule", opaque(10)).unwrap();

    let composer = EnvironmentComposer::new(synthetic_globals(), registered, OverrideTable::new());
    let extension = composer.environment(Context::Extension).unwrap();

    assert_eq!(extension.get("rule"), Some(&opaque(10)));
    assert_eq!(
        extension.warnings(),
        &[CollisionWarning::RegisteredShadowsFixed {
            name: "rule".to_string(),
            context: Context::Extension,
        }]
    );
}

#[test]
fn acknowledged_registered_shadow_is_silent() {
    let mut registered = RegisteredSymbols::new();
    registered.register_shadowing("rule", opaque(10)).unwrap();

    let composer = EnvironmentComposer::new(synthetic_globals(), registered, OverrideTable::new());
    let extension = composer.environment(Context::Extension).unwrap();

    assert_eq!(extension.get("rule"), Some(&opaque(10)));
    assert!(extension.warnings().is_empty());
}

#[test]
fn override_of_a_fixed_name_warns_unless_acknowledged() {
    let mut overrides = OverrideTable::new();
    overrides.substitute("rule", opaque(30));

    let composer = EnvironmentComposer::new(
        synthetic_globals(),
        RegisteredSymbols::new(),
        overrides,
    );
    let extension = composer.environment(Context::Extension).unwrap();
    assert_eq!(extension.get("rule"), Some(&opaque(30)));
    assert_eq!(
        extension.warnings(),
        &[CollisionWarning::OverrideShadowsFixed {
            name: "rule".to_string(),
            context: Context::Extension,
        }]
    );

    let mut overrides = OverrideTable::new();
    overrides.substitute_acknowledged("rule", opaque(30));
    let composer = EnvironmentComposer::new(
        synthetic_globals(),
        RegisteredSymbols::new(),
        overrides,
    );
    let extension = composer.environment(Context::Extension).unwrap();
    assert!(extension.warnings().is_empty());
}

#[test]
fn override_without_a_target_warns_and_adds_the_symbol() {
    let mut overrides = OverrideTable::new();
    overrides.substitute("experimental_helper", opaque(40));

    let composer = EnvironmentComposer::new(
        synthetic_globals(),
        RegisteredSymbols::new(),
        overrides,
    );
    let extension = composer.environment(Context::Extension).unwrap();

    assert_eq!(extension.get("experimental_helper"), Some(&opaque(40)));
    assert_eq!(
        extension.warnings(),
        &[CollisionWarning::OverrideWithoutTarget {
            name: "experimental_helper".to_string(),
            context: Context::Extension,
        }]
    );
}

#[test]
fn manifest_only_collision_shadows_toplevel_but_not_native() {
    let mut registered = RegisteredSymbols::new();
    registered.register("package", opaque(50)).unwrap();

    let composer = EnvironmentComposer::new(synthetic_globals(), registered, OverrideTable::new());
    let manifest = composer.environment(Context::Manifest).unwrap();

    // The registered value wins the top-level merge per precedence, while
    // the aggregate keeps the name out of its field set.
    assert_eq!(manifest.get("package"), Some(&opaque(50)));
    let Some(Value::Namespace(native)) = manifest.get("native") else {
        panic!("manifest environments bind 'native' to a namespace");
    };
    assert!(!native.contains("package"));
    assert_eq!(
        manifest.warnings(),
        &[CollisionWarning::RegisteredCollidesWithManifestOnly {
            name: "package".to_string(),
        }]
    );
}

#[test]
fn warnings_name_the_symbol_they_are_about() {
    let warning = CollisionWarning::OverrideWithoutTarget {
        name: "experimental_helper".to_string(),
        context: Context::Manifest,
    };
    assert_eq!(warning.symbol(), "experimental_helper");
    assert_eq!(
        warning.to_string(),
        "override for 'experimental_helper' matches no existing manifest top-level"
    );
}
