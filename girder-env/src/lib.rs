//! Environment composition for the Girder build dialect.
//!
//! `girder-dialect` supplies the fixed baseline vocabulary; this crate
//! layers the two runtime overlays on top of it and publishes the final
//! environments scripts evaluate against:
//!
//! - **Registered symbols** contributed by the rule-registration
//!   collaborator, which may add new top-levels or intentionally shadow
//!   fixed ones
//! - **Override substitutions** that replace the value bound to an existing
//!   name for staged rollout of alternate implementations
//!
//! Composition follows a strict precedence chain (overrides over registered
//! symbols over fixed bindings), builds the `native` aggregate exposed in
//! manifest environments, and caches one immutable environment per context
//! for the lifetime of the composer.

pub mod aggregate;
pub mod composer;
pub mod error;
pub mod overrides;
pub mod registration;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use aggregate::NativeAggregate;
pub use composer::{ComposedEnvironment, Context, EnvironmentComposer, LayerKind, LayerStack};
pub use error::{CollisionWarning, CompositionDefect, RegistrationError};
pub use overrides::OverrideTable;
pub use registration::RegisteredSymbols;
