//! Value representation for Girder dialect symbol environments.
//!
//! Every top-level name in a manifest or extension environment is bound to a
//! `Value`: a constant, a builtin function declaration, or a read-only
//! namespace. Function values carry declarations only (name, parameters,
//! doc); bodies live in the evaluator, which dispatches on the declared name.

use indexmap::IndexMap;

/// A value bound to a top-level name in a dialect environment
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer constant
    Integer(i64),
    /// Boolean constant
    Boolean(bool),
    /// UTF-8 string constant
    String(String),
    /// Builtin function declaration (body supplied by the evaluator)
    Function(FunctionSpec),
    /// Read-only bag of named values
    Namespace(Namespace),
}

impl Value {
    /// Get the kind name of this value
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Function(_) => "Function",
            Value::Namespace(_) => "Namespace",
        }
    }

    /// Shorthand for a string constant
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Function(spec) => write!(f, "<function {}>", spec.name()),
            Value::Namespace(ns) => write!(f, "<namespace [{}]>", ns.names().join(", ")),
        }
    }
}

/// Declaration of a builtin function exposed to scripts
///
/// Mirrors how the evaluator sees builtins: a stable name to dispatch on and
/// the parameter list scripts may pass. The declaration is pure data so that
/// environments stay comparable and sharable across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    name: String,
    params: Vec<Param>,
    doc: String,
}

impl FunctionSpec {
    /// Create a new function declaration
    pub fn new(name: impl Into<String>, params: Vec<Param>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params,
            doc: doc.into(),
        }
    }

    /// The name the evaluator dispatches on
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters, in call order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// One-line documentation string
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Names of parameters a call site must supply
    pub fn required_param_names(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// A declared parameter of a builtin function
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub required: bool,
}

impl Param {
    /// A parameter every call site must supply
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    /// A parameter with a default the evaluator fills in
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Read-only, insertion-ordered collection of named values
///
/// Used for aggregate objects such as `native` and for grouped builtin
/// constructors such as `attr`. Construction happens up front; after that the
/// namespace only hands out shared references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    entries: IndexMap<String, Value>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a namespace from name/value pairs
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Check whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Field names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the namespace has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
