//! Girder Dialect Baseline
//!
//! The fixed symbol environment for Girder's build-description dialect. Two
//! file categories share the dialect: declarative manifests and reusable
//! `.gex` extensions. This crate is the source of truth for the top-level
//! names that are always present in each category, before the host build
//! system registers rule symbols and before any override substitutions are
//! applied. Those overlays are layered on by `girder-env`.
//!
//! The split matters for layering: the baseline vocabulary must be knowable
//! without depending on the rule-registration machinery, so this crate
//! depends on nothing else in the workspace.

pub mod error;
pub mod globals;
pub mod value;

// The concrete vocabulary is reachable only through the registry accessors.
mod vocabulary;

// Re-export public API
pub use error::VocabularyDefect;
pub use globals::{fixed_globals, FixedGlobals, FixedMapping, VocabularyStats, NATIVE};
pub use value::{FunctionSpec, Namespace, Param, Value};
