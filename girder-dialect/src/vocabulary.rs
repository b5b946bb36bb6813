//! Hard-coded builtin vocabulary of the Girder dialect.
//!
//! The three tables built here are the dialect's always-present top-level
//! names, before any build rules are registered and before any overrides are
//! applied. Builders in this module construct declarations only; the
//! evaluator owns every function body.

use indexmap::IndexMap;

use crate::value::{FunctionSpec, Namespace, Param, Value};

fn builtin(name: &str, params: Vec<Param>, doc: &str) -> Value {
    Value::Function(FunctionSpec::new(name, params, doc))
}

fn required(name: &str) -> Param {
    Param::required(name)
}

fn optional(name: &str) -> Param {
    Param::optional(name)
}

/// Manifest top-levels that are also fields of the `native` aggregate
///
/// These are the loading-phase helpers: callable bare in manifests, and via
/// `native` from extension code that runs during loading.
pub(crate) fn shared_with_native() -> IndexMap<String, Value> {
    let mut table = IndexMap::new();
    table.insert(
        "glob".to_string(),
        builtin(
            "glob",
            vec![
                required("include"),
                optional("exclude"),
                optional("allow_empty"),
            ],
            "Match files under the current package against a set of patterns.",
        ),
    );
    table.insert(
        "existing_target".to_string(),
        builtin(
            "existing_target",
            vec![required("name")],
            "Return the attributes of a target already declared in this package.",
        ),
    );
    table.insert(
        "existing_targets".to_string(),
        builtin(
            "existing_targets",
            vec![],
            "Return all targets declared so far in this package.",
        ),
    );
    table.insert(
        "package_name".to_string(),
        builtin(
            "package_name",
            vec![],
            "Name of the package currently being loaded.",
        ),
    );
    table.insert(
        "repo_name".to_string(),
        builtin(
            "repo_name",
            vec![],
            "Canonical name of the repository containing the current package.",
        ),
    );
    table.insert(
        "subpackages".to_string(),
        builtin(
            "subpackages",
            vec![required("include"), optional("exclude")],
            "List immediate subpackages matching a set of patterns.",
        ),
    );
    table
}

/// Manifest top-levels that are *not* fields of `native`
///
/// Package-scoped declarations and bare constants that only make sense at
/// the top level of a manifest.
pub(crate) fn manifest_only() -> IndexMap<String, Value> {
    let mut table = IndexMap::new();
    table.insert(
        "package".to_string(),
        builtin(
            "package",
            vec![
                optional("default_visibility"),
                optional("default_testonly"),
            ],
            "Declare defaults for every target in the current package.",
        ),
    );
    table.insert(
        "licenses".to_string(),
        builtin(
            "licenses",
            vec![required("kinds")],
            "Declare the license kinds covering the current package.",
        ),
    );
    table.insert("select".to_string(), select_builtin());
    table.insert("PUBLIC".to_string(), Value::string("public"));
    table.insert("PRIVATE".to_string(), Value::string("private"));
    table
}

/// Extension-file top-levels
///
/// The rule-authoring surface. The `native` aggregate is deliberately absent:
/// the composer decides how extension code reaches it.
pub(crate) fn extension_toplevels() -> IndexMap<String, Value> {
    let mut table = IndexMap::new();
    table.insert(
        "rule".to_string(),
        builtin(
            "rule",
            vec![required("implementation"), optional("attrs"), optional("doc")],
            "Define a new build rule callable from manifests.",
        ),
    );
    table.insert(
        "provider".to_string(),
        builtin(
            "provider",
            vec![optional("fields"), optional("doc")],
            "Define a provider for passing information between rules.",
        ),
    );
    // `select` is shared with manifests; the manifest/extension split may
    // overlap, only the two manifest tables must stay disjoint.
    table.insert("select".to_string(), select_builtin());
    table.insert(
        "visibility".to_string(),
        builtin(
            "visibility",
            vec![required("value")],
            "Restrict which packages may load the current extension.",
        ),
    );
    table.insert("attr".to_string(), Value::Namespace(attr_namespace()));
    table
}

fn select_builtin() -> Value {
    builtin(
        "select",
        vec![required("branches"), optional("no_match_error")],
        "Choose an attribute value based on the active configuration.",
    )
}

/// The `attr` namespace of attribute-schema constructors
fn attr_namespace() -> Namespace {
    let schema_params = || vec![optional("default"), optional("doc"), optional("mandatory")];
    Namespace::from_entries(vec![
        (
            "string".to_string(),
            builtin("attr.string", schema_params(), "Schema for a string attribute."),
        ),
        (
            "bool".to_string(),
            builtin("attr.bool", schema_params(), "Schema for a boolean attribute."),
        ),
        (
            "int".to_string(),
            builtin("attr.int", schema_params(), "Schema for an integer attribute."),
        ),
        (
            "label".to_string(),
            builtin(
                "attr.label",
                schema_params(),
                "Schema for an attribute holding one target label.",
            ),
        ),
        (
            "label_list".to_string(),
            builtin(
                "attr.label_list",
                schema_params(),
                "Schema for an attribute holding a list of target labels.",
            ),
        ),
        (
            "string_list".to_string(),
            builtin(
                "attr.string_list",
                schema_params(),
                "Schema for an attribute holding a list of strings.",
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_namespace_exposes_schema_constructors() {
        let table = extension_toplevels();
        let Some(Value::Namespace(attr)) = table.get("attr") else {
            panic!("extension top-levels should bind 'attr' to a namespace");
        };
        assert_eq!(
            attr.names(),
            vec!["string", "bool", "int", "label", "label_list", "string_list"]
        );
        for (name, value) in attr.iter() {
            let Value::Function(spec) = value else {
                panic!("attr.{} should be a function declaration", name);
            };
            assert_eq!(spec.name(), format!("attr.{}", name));
        }
    }

    #[test]
    fn select_is_available_in_both_file_categories() {
        let manifest = manifest_only();
        let extension = extension_toplevels();
        assert_eq!(manifest.get("select"), extension.get("select"));
    }

    #[test]
    fn visibility_constants_are_strings() {
        let table = manifest_only();
        assert_eq!(table.get("PUBLIC"), Some(&Value::string("public")));
        assert_eq!(table.get("PRIVATE"), Some(&Value::string("private")));
    }
}
