//! Error and warning types for environment composition.
//!
//! Composition distinguishes fatal defects from collision warnings. A defect
//! is a static authoring mistake; no environment is published when one is
//! detected. A warning never blocks composition; it exists for operator
//! visibility and is both logged and carried on the composed environment.

use miette::Diagnostic;
use thiserror::Error;

use crate::composer::Context;

/// Fatal defects detected while composing an environment
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CompositionDefect {
    #[error("the 'native' aggregate would expose '{name}', a manifest-only top-level")]
    #[diagnostic(
        code(girder::env::aggregate_field_shadows_manifest_only),
        help("Fields of `native` are the shared manifest top-levels plus registered rules; '{name}' belongs to neither")
    )]
    AggregateFieldShadowsManifestOnly { name: String },
}

/// Errors raised by the symbol registration surface
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("registered symbols need a non-empty name")]
    #[diagnostic(code(girder::env::empty_symbol_name))]
    EmptySymbolName,

    #[error("symbol '{name}' is already registered")]
    #[diagnostic(
        code(girder::env::duplicate_symbol),
        help("Each build-rule symbol may be registered once per configuration epoch")
    )]
    DuplicateSymbol { name: String },
}

/// Non-fatal collisions surfaced during composition
///
/// Warnings are logged through the `log` facade when the environment is
/// composed and kept on the [`ComposedEnvironment`](crate::ComposedEnvironment)
/// for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionWarning {
    #[error("registered symbol '{name}' shadows a fixed {context} top-level without acknowledgment")]
    RegisteredShadowsFixed { name: String, context: Context },

    #[error("registered symbol '{name}' collides with a manifest-only top-level and is kept out of 'native'")]
    RegisteredCollidesWithManifestOnly { name: String },

    #[error("override for '{name}' substitutes a fixed {context} binding without acknowledgment")]
    OverrideShadowsFixed { name: String, context: Context },

    #[error("override for '{name}' matches no existing {context} top-level")]
    OverrideWithoutTarget { name: String, context: Context },
}

impl CollisionWarning {
    /// Name of the symbol the warning is about
    pub fn symbol(&self) -> &str {
        match self {
            CollisionWarning::RegisteredShadowsFixed { name, .. } => name,
            CollisionWarning::RegisteredCollidesWithManifestOnly { name } => name,
            CollisionWarning::OverrideShadowsFixed { name, .. } => name,
            CollisionWarning::OverrideWithoutTarget { name, .. } => name,
        }
    }
}
