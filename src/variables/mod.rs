//! Variable and dependency declarations.
//!
//! A template declares its variables in `plate.yml`. Each variable is a named,
//! typed slot that is resolved to a concrete value before scaffolding:
//!
//! ```yaml
//! variables:
//!   - name: project_name
//!     description: Name of the generated project
//!     example: my-service
//!
//!   - name: port
//!     type: int
//!     default: 8080
//!
//!   - name: service_name
//!     reference: project_name
//!
//! dependencies:
//!   - name: docs
//!     template-url: ../docs
//!     output-folder: docs
//!     variables:
//!       - name: title
//!         default: "{{ project_name }} documentation"
//! ```
//!
//! Dependency variables are exposed to the parent under the dependency's
//! namespace, so `title` above becomes `docs.title`.
//!
//! Values are carried as [`serde_json::Value`] until the final type conversion
//! in [`convert`].

pub mod convert;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::{PlateError, Result};

pub use convert::{TypeConverter, YamlTypeConverter};

/// Separator between a dependency name and a variable name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Free-form text (the default when `type` is omitted)
    #[default]
    String,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// `true` / `false`
    Bool,
    /// Sequence of values
    List,
    /// Mapping of string keys to values
    Map,
    /// One of a fixed set of strings (see [`Variable::options`])
    Enum,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Map => "map",
            Self::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// A single template variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Variable {
    /// Unique key within the owning namespace. Namespaced variables carry the
    /// `dep.` prefix here.
    pub name: String,

    /// Human-readable help text shown when prompting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared type the final value is converted to.
    #[serde(default, rename = "type")]
    pub var_type: VariableType,

    /// Example value shown when prompting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Value used when nothing else supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Name of another variable whose value this one inherits. When set,
    /// `default` is advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Allowed values for [`VariableType::Enum`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Variable {
    /// Create a string variable with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            var_type: VariableType::String,
            example: None,
            default: None,
            reference: None,
            options: Vec::new(),
        }
    }

    pub fn with_type(mut self, var_type: VariableType) -> Self {
        self.var_type = var_type;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Display identity of the variable: the namespace-qualified name.
    pub fn full_name(&self) -> &str {
        &self.name
    }

    /// Copy of this variable renamed to `<namespace>.<name>`.
    #[must_use]
    pub fn namespaced(&self, namespace: &str) -> Self {
        let mut variable = self.clone();
        variable.name = qualify(namespace, &self.name);
        variable
    }
}

/// A named sub-template whose variables are imported under its namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Dependency {
    /// Namespace for the dependency's variables.
    pub name: String,

    /// Where the dependency's template lives.
    #[serde(default)]
    pub template_url: String,

    /// Output folder for the dependency, relative to the parent's.
    #[serde(default)]
    pub output_folder: String,

    /// Do not pass the parent's overrides down to the nested pass.
    #[serde(default)]
    pub dont_inherit_variables: bool,

    /// Variables declared by the dependency.
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// The dependency's variables, each renamed to `<dependency>.<variable>`.
    ///
    /// References to sibling variables are qualified the same way. References
    /// to names the dependency does not declare are left alone and resolve in
    /// the parent's scope.
    pub fn namespaced_variables(&self) -> Vec<Variable> {
        self.variables
            .iter()
            .map(|v| {
                let mut namespaced = v.namespaced(&self.name);
                if let Some(reference) = &v.reference
                    && self.variables.iter().any(|sibling| &sibling.name == reference)
                {
                    namespaced.reference = Some(qualify(&self.name, reference));
                }
                namespaced
            })
            .collect()
    }
}

/// Join a namespace and a name with [`NAMESPACE_SEPARATOR`].
pub fn qualify(namespace: &str, name: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
}

/// Split `dep.var` into `("dep", "var")`. Returns `None` for unqualified names.
pub fn split_namespace(name: &str) -> Option<(&str, &str)> {
    name.split_once(NAMESPACE_SEPARATOR)
}

/// Parse a user-supplied literal as YAML.
///
/// `8080` becomes a number, `[a, b]` a list, `key: value` a map and anything
/// else a string. Quoting (`""`, `'007'`) forces a string.
pub fn parse_yaml_string(input: &str) -> Result<Value> {
    serde_yaml::from_str::<Value>(input).map_err(|e| PlateError::InvalidYaml {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
