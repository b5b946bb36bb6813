//! Defect types for the fixed dialect vocabulary.
//!
//! A vocabulary defect is a static authoring mistake in the built-in symbol
//! tables. It is detected during one-time validation and aborts startup; it
//! is never a recoverable runtime condition.

use miette::Diagnostic;
use thiserror::Error;

/// Validation failures in the hard-coded dialect vocabulary
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum VocabularyDefect {
    #[error("top-level name '{name}' appears in both manifest vocabularies")]
    #[diagnostic(
        code(girder::dialect::duplicate_manifest_toplevel),
        help("A manifest top-level is either a field of `native` or manifest-only, never both; remove '{name}' from one of the two tables")
    )]
    DuplicateManifestToplevel { name: String },

    #[error("extension top-levels must not bind the reserved name '{name}'")]
    #[diagnostic(
        code(girder::dialect::reserved_aggregate_name),
        help("The aggregate object is inserted by the environment composer; remove '{name}' from the extension table")
    )]
    ReservedAggregateName { name: String },

    #[error("the {table} vocabulary contains an empty top-level name")]
    #[diagnostic(
        code(girder::dialect::empty_toplevel_name),
        help("Every top-level symbol needs a non-empty identifier")
    )]
    EmptyToplevelName { table: &'static str },
}
