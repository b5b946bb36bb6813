//! Per-context environment composition.
//!
//! The composer assembles one immutable environment per file category from
//! the fixed vocabulary, the registered symbols, and the override
//! substitutions. Precedence is an explicit lookup chain (overrides over
//! registered symbols over fixed bindings), and each context is composed at
//! most once per composer, then shared read-only with every evaluation.

use std::sync::{Arc, OnceLock};

use girder_dialect::{fixed_globals, FixedGlobals, Value, NATIVE};
use indexmap::IndexMap;

use crate::aggregate::NativeAggregate;
use crate::error::{CollisionWarning, CompositionDefect};
use crate::overrides::OverrideTable;
use crate::registration::RegisteredSymbols;

/// The file category an environment is composed for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    /// Declarative build manifests
    Manifest,
    /// Reusable `.gex` extension files
    Extension,
}

impl Context {
    pub fn as_str(self) -> &'static str {
        match self {
            Context::Manifest => "manifest",
            Context::Extension => "extension",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which layer of the precedence chain a binding came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// Fixed vocabulary selected by context (plus `native` for manifests)
    Fixed,
    /// Symbols contributed by the rule-registration collaborator
    Registered,
    /// Override substitutions
    Override,
}

/// Precedence-ordered chain of symbol sources
///
/// Layers are pushed lowest precedence first. Lookup scans from the top of
/// the chain; flattening applies the same rule to every name at once.
#[derive(Debug, Default)]
pub struct LayerStack {
    layers: Vec<(LayerKind, IndexMap<String, Value>)>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer above all previously pushed layers
    pub fn push(&mut self, kind: LayerKind, symbols: IndexMap<String, Value>) {
        self.layers.push((kind, symbols));
    }

    /// Resolve a name against the chain, first match from the top wins
    pub fn resolve(&self, name: &str) -> Option<(LayerKind, &Value)> {
        self.layers
            .iter()
            .rev()
            .find_map(|(kind, symbols)| symbols.get(name).map(|value| (*kind, value)))
    }

    /// Flatten the chain into one mapping
    ///
    /// Name order follows first appearance from the bottom layer up; each
    /// name is bound to its highest-precedence value, matching `resolve`.
    pub fn flatten(&self) -> IndexMap<String, Value> {
        let mut flat = IndexMap::new();
        for (_, symbols) in &self.layers {
            for (name, value) in symbols {
                // IndexMap keeps the original position on re-insert, so
                // later layers replace values without reordering names.
                flat.insert(name.clone(), value.clone());
            }
        }
        flat
    }
}

/// An immutable, fully composed environment for one context
///
/// Handed to the evaluator at the start of each script evaluation. There is
/// no mutating surface; clones of the `Arc` share one allocation across
/// concurrent evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedEnvironment {
    context: Context,
    symbols: IndexMap<String, Value>,
    warnings: Vec<CollisionWarning>,
}

impl ComposedEnvironment {
    /// The context this environment was composed for
    pub fn context(&self) -> Context {
        self.context
    }

    /// Look up a top-level binding
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// Check whether a top-level name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Top-level names in composition order
    pub fn names(&self) -> Vec<&str> {
        self.symbols.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over bindings in composition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.symbols.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of top-level bindings
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if no name is bound
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Collision warnings recorded while composing this environment
    pub fn warnings(&self) -> &[CollisionWarning] {
        &self.warnings
    }
}

/// Composes and caches one environment per context
///
/// Construction is cheap; each context's environment is built on first
/// request and reused afterwards. Rebuilding after a registration or
/// override change means discarding the composer and creating a new one;
/// published environments are never invalidated in place.
#[derive(Debug)]
pub struct EnvironmentComposer {
    globals: FixedGlobals,
    registered: RegisteredSymbols,
    overrides: OverrideTable,
    manifest: OnceLock<Result<Arc<ComposedEnvironment>, CompositionDefect>>,
    extension: OnceLock<Result<Arc<ComposedEnvironment>, CompositionDefect>>,
}

impl EnvironmentComposer {
    /// Compose from an explicit vocabulary
    ///
    /// Composition tests inject synthetic vocabularies through this
    /// constructor; production callers want [`EnvironmentComposer::with_builtin_globals`].
    pub fn new(
        globals: FixedGlobals,
        registered: RegisteredSymbols,
        overrides: OverrideTable,
    ) -> Self {
        Self {
            globals,
            registered,
            overrides,
            manifest: OnceLock::new(),
            extension: OnceLock::new(),
        }
    }

    /// Compose from the process-wide builtin vocabulary
    pub fn with_builtin_globals(registered: RegisteredSymbols, overrides: OverrideTable) -> Self {
        Self::new(fixed_globals().clone(), registered, overrides)
    }

    /// Get the composed environment for a context, composing on first use
    ///
    /// The result is cached: repeated calls for the same context return the
    /// same shared environment (or the same defect).
    pub fn environment(
        &self,
        context: Context,
    ) -> Result<Arc<ComposedEnvironment>, CompositionDefect> {
        let slot = match context {
            Context::Manifest => &self.manifest,
            Context::Extension => &self.extension,
        };
        slot.get_or_init(|| self.compose(context).map(Arc::new))
            .clone()
    }

    /// Whether a context's environment has been composed yet
    pub fn is_composed(&self, context: Context) -> bool {
        match context {
            Context::Manifest => self.manifest.get().is_some(),
            Context::Extension => self.extension.get().is_some(),
        }
    }

    fn compose(&self, context: Context) -> Result<ComposedEnvironment, CompositionDefect> {
        let mut warnings = Vec::new();

        let fixed = match context {
            Context::Manifest => {
                let aggregate = NativeAggregate::build(&self.globals, &self.registered)?;
                warnings.extend(aggregate.warnings().to_vec());
                let mut fixed = self.globals.manifest_only().clone();
                fixed.insert(NATIVE.to_string(), aggregate.to_value());
                fixed
            }
            Context::Extension => self.globals.extension_toplevels().clone(),
        };

        for name in self.registered.symbols().keys() {
            // Collisions against manifest-only names are reported by the
            // aggregate builder; everything else in the fixed layer warns
            // here unless the shadow was acknowledged.
            let reported_by_aggregate =
                context == Context::Manifest && self.globals.manifest_only().contains_key(name);
            if fixed.contains_key(name)
                && !reported_by_aggregate
                && !self.registered.is_acknowledged(name)
            {
                warnings.push(CollisionWarning::RegisteredShadowsFixed {
                    name: name.clone(),
                    context,
                });
            }
        }

        for name in self.overrides.substitutions().keys() {
            if fixed.contains_key(name) {
                if !self.overrides.is_acknowledged(name) {
                    warnings.push(CollisionWarning::OverrideShadowsFixed {
                        name: name.clone(),
                        context,
                    });
                }
            } else if !self.registered.symbols().contains_key(name) {
                warnings.push(CollisionWarning::OverrideWithoutTarget {
                    name: name.clone(),
                    context,
                });
            }
        }

        let mut stack = LayerStack::new();
        stack.push(LayerKind::Fixed, fixed);
        stack.push(LayerKind::Registered, self.registered.symbols().clone());
        stack.push(LayerKind::Override, self.overrides.substitutions().clone());
        let symbols = stack.flatten();

        for warning in &warnings {
            log::warn!("{}", warning);
        }
        log::debug!(
            "composed {} environment: {} top-levels, {} warnings",
            context,
            symbols.len(),
            warnings.len()
        );

        Ok(ComposedEnvironment {
            context,
            symbols,
            warnings,
        })
    }
}
