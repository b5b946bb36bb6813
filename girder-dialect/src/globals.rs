//! Fixed environment registry with one-time validation and caching.
//!
//! Single source of truth for the dialect's always-present top-level names,
//! independent of any registered build rule. The three tables are computed
//! and validated once per process; every later query returns the same cached
//! object.

use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::error::VocabularyDefect;
use crate::value::Value;
use crate::vocabulary;

/// An immutable name-to-value table produced by the registry
pub type FixedMapping = IndexMap<String, Value>;

/// Name under which the composer binds the aggregate object in manifests
pub const NATIVE: &str = "native";

lazy_static! {
    /// Validated fixed vocabulary cached for the process lifetime
    static ref FIXED_GLOBALS: FixedGlobals = load_fixed_globals();
}

/// Get the validated, process-wide fixed vocabulary
///
/// First call builds and validates the tables; a vocabulary defect aborts the
/// process because no environment may ever be composed from an invalid
/// baseline. All later calls return the same object.
pub fn fixed_globals() -> &'static FixedGlobals {
    &FIXED_GLOBALS
}

fn load_fixed_globals() -> FixedGlobals {
    match FixedGlobals::build() {
        Ok(globals) => globals,
        Err(defect) => {
            eprintln!("🚨 Fixed dialect vocabulary failed validation:\n");
            eprintln!("{:?}", miette::Report::new(defect));
            eprintln!("The built-in vocabulary must validate before any script can be loaded.");
            std::process::exit(1);
        }
    }
}

/// The dialect's three fixed top-level tables
///
/// `shared_with_native` and `manifest_only` partition the manifest-file
/// top-levels; `extension_toplevels` stands alone. Instances are validated on
/// construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGlobals {
    shared_with_native: FixedMapping,
    manifest_only: FixedMapping,
    extension_toplevels: FixedMapping,
}

impl FixedGlobals {
    /// Build and validate the hard-coded vocabulary
    pub fn build() -> Result<Self, VocabularyDefect> {
        Self::from_mappings(
            vocabulary::shared_with_native(),
            vocabulary::manifest_only(),
            vocabulary::extension_toplevels(),
        )
    }

    /// Assemble a registry from explicit tables, validating the invariants
    ///
    /// The two manifest tables must be disjoint, the extension table must not
    /// bind the aggregate name, and no table may contain an empty name.
    /// Exposed so composition tests can run against synthetic vocabularies.
    pub fn from_mappings(
        shared_with_native: FixedMapping,
        manifest_only: FixedMapping,
        extension_toplevels: FixedMapping,
    ) -> Result<Self, VocabularyDefect> {
        for (table, mapping) in [
            ("shared_with_native", &shared_with_native),
            ("manifest_only", &manifest_only),
            ("extension_toplevels", &extension_toplevels),
        ] {
            if mapping.keys().any(|k| k.is_empty()) {
                return Err(VocabularyDefect::EmptyToplevelName { table });
            }
        }

        for name in shared_with_native.keys() {
            if manifest_only.contains_key(name) {
                return Err(VocabularyDefect::DuplicateManifestToplevel { name: name.clone() });
            }
        }

        if extension_toplevels.contains_key(NATIVE) {
            return Err(VocabularyDefect::ReservedAggregateName {
                name: NATIVE.to_string(),
            });
        }

        Ok(Self {
            shared_with_native,
            manifest_only,
            extension_toplevels,
        })
    }

    /// Manifest top-levels that are also fields of the `native` aggregate
    pub fn shared_with_native(&self) -> &FixedMapping {
        &self.shared_with_native
    }

    /// Manifest top-levels that are *not* fields of `native`
    pub fn manifest_only(&self) -> &FixedMapping {
        &self.manifest_only
    }

    /// Extension-file top-levels, excluding the `native` aggregate
    pub fn extension_toplevels(&self) -> &FixedMapping {
        &self.extension_toplevels
    }

    /// Summary counts for diagnostics
    pub fn stats(&self) -> VocabularyStats {
        VocabularyStats {
            shared_with_native: self.shared_with_native.len(),
            manifest_only: self.manifest_only.len(),
            extension_toplevels: self.extension_toplevels.len(),
        }
    }
}

/// Vocabulary size summary for diagnostics
#[derive(Debug)]
pub struct VocabularyStats {
    pub shared_with_native: usize,
    pub manifest_only: usize,
    pub extension_toplevels: usize,
}

impl std::fmt::Display for VocabularyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fixed vocabulary: {} shared with native, {} manifest-only, {} extension top-levels",
            self.shared_with_native, self.manifest_only, self.extension_toplevels
        )
    }
}
