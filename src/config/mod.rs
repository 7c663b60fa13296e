//! Template configuration (`plate.yml`).
//!
//! A template folder carries a `plate.yml` declaring the variables the
//! template needs and the dependencies it pulls in:
//!
//! ```yaml
//! variables:
//!   - name: project_name
//!     description: Name of the generated project
//!   - name: license
//!     type: enum
//!     options: [MIT, Apache-2.0]
//!     default: MIT
//!
//! dependencies:
//!   - name: docs
//!     template-url: ../docs
//!     output-folder: docs
//!     variables:
//!       - name: title
//!         default: "{{ project_name }} docs"
//! ```
//!
//! Both sections are optional. An empty file declares nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::{PlateError, Result};
use crate::resolver::{CONFIG_DEPS_KEY, CONFIG_VARS_KEY, THIS_KEY};
use crate::variables::{Dependency, NAMESPACE_SEPARATOR, Variable, VariableType};

/// File name of the template configuration inside a template folder.
pub const CONFIG_FILE_NAME: &str = "plate.yml";

/// Parsed `plate.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Variables declared by this template, in file order.
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Dependencies of this template, in file order.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl TemplateConfig {
    pub fn new(variables: Vec<Variable>, dependencies: Vec<Dependency>) -> Self {
        Self {
            variables,
            dependencies,
        }
    }

    /// Load and validate the config at `path`.
    ///
    /// # Errors
    ///
    /// - [`PlateError::ConfigNotFound`] if the file does not exist
    /// - [`PlateError::ConfigParseError`] if it is not a valid config
    /// - [`PlateError::ConfigValidationError`] if validation fails
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PlateError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::from_yaml_str(&content).map_err(|e| match e {
            PlateError::ConfigParseError { reason, .. } => PlateError::ConfigParseError {
                file: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!(
            "Loaded {} with {} variables and {} dependencies",
            path.display(),
            config.variables.len(),
            config.dependencies.len()
        );
        Ok(config)
    }

    /// Load `plate.yml` from a template folder.
    pub async fn load_from_folder(folder: &Path) -> Result<Self> {
        Self::load_from(&folder.join(CONFIG_FILE_NAME)).await
    }

    /// Parse and validate a config from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self =
            serde_yaml::from_str(content).map_err(|e| PlateError::ConfigParseError {
                file: CONFIG_FILE_NAME.to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the declarations for mistakes that would make resolution
    /// ambiguous or impossible.
    pub fn validate(&self) -> Result<()> {
        validate_variables(&self.variables, None)?;

        let mut seen = HashSet::new();
        for dependency in &self.dependencies {
            if dependency.name.trim().is_empty() {
                return Err(invalid("dependency names must not be empty".to_string()));
            }
            if is_reserved(&dependency.name) {
                return Err(invalid(format!(
                    "dependency name '{}' is reserved for template introspection",
                    dependency.name
                )));
            }
            if dependency.name.contains(NAMESPACE_SEPARATOR) {
                return Err(invalid(format!(
                    "dependency name '{}' must not contain '{}'",
                    dependency.name, NAMESPACE_SEPARATOR
                )));
            }
            if !seen.insert(dependency.name.as_str()) {
                tracing::warn!(
                    "Dependency '{}' is declared more than once; the last declaration wins",
                    dependency.name
                );
            }
            validate_variables(&dependency.variables, Some(&dependency.name))?;
        }

        Ok(())
    }
}

fn validate_variables(variables: &[Variable], owner: Option<&str>) -> Result<()> {
    let scope = owner.map_or_else(|| "the template".to_string(), |o| format!("dependency '{o}'"));

    for variable in variables {
        if variable.name.trim().is_empty() {
            return Err(invalid(format!("a variable in {scope} has an empty name")));
        }
        if is_reserved(&variable.name) {
            return Err(invalid(format!(
                "variable name '{}' in {scope} is reserved for template introspection",
                variable.name
            )));
        }
        if variable.var_type == VariableType::Enum && variable.options.is_empty() {
            return Err(invalid(format!(
                "enum variable '{}' in {scope} must declare options",
                variable.name
            )));
        }
    }
    Ok(())
}

/// Names taken by the introspection entries.
fn is_reserved(name: &str) -> bool {
    [CONFIG_VARS_KEY, CONFIG_DEPS_KEY, THIS_KEY].contains(&name)
}

fn invalid(reason: String) -> PlateError {
    PlateError::ConfigValidationError {
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
variables:
  - name: project_name
    description: Name of the project
  - name: license
    type: enum
    options: [MIT, Apache-2.0]
    default: MIT

dependencies:
  - name: docs
    template-url: ../docs
    output-folder: docs
    variables:
      - name: title
        default: "{{ project_name }} docs"
  - name: ci
    template-url: ../ci
"#;

    #[test]
    fn test_parse_sample() {
        let config = TemplateConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.variables[1].var_type, VariableType::Enum);
        assert_eq!(config.variables[1].default, Some(json!("MIT")));
        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(config.dependencies[0].variables[0].name, "title");
        assert_eq!(config.dependencies[1].template_url, "../ci");
    }

    #[test]
    fn test_empty_config() {
        let config = TemplateConfig::from_yaml_str("").unwrap();
        assert!(config.variables.is_empty());
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = TemplateConfig::from_yaml_str("variables: [name: a").unwrap_err();
        assert!(matches!(err, PlateError::ConfigParseError { .. }));
    }

    #[test]
    fn test_validation_errors() {
        let err = TemplateConfig::from_yaml_str("variables:\n  - name: ''\n").unwrap_err();
        assert!(matches!(err, PlateError::ConfigValidationError { .. }));

        let err =
            TemplateConfig::from_yaml_str("variables:\n  - name: color\n    type: enum\n").unwrap_err();
        assert!(err.to_string().contains("must declare options"));

        let err = TemplateConfig::from_yaml_str("dependencies:\n  - name: a.b\n").unwrap_err();
        assert!(err.to_string().contains("must not contain '.'"));
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in ["This", "PlateConfigVars", "PlateConfigDeps"] {
            let err = TemplateConfig::from_yaml_str(&format!("variables:\n  - name: {name}\n"))
                .unwrap_err();
            assert!(matches!(err, PlateError::ConfigValidationError { .. }));
            assert!(err.to_string().contains("reserved"), "{name}: {err}");
        }

        let err = TemplateConfig::from_yaml_str("dependencies:\n  - name: This\n").unwrap_err();
        assert!(err.to_string().contains("reserved"));

        // Inside a dependency the name is namespaced, but still reserved
        let err = TemplateConfig::from_yaml_str(
            "dependencies:\n  - name: docs\n    variables:\n      - name: This\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("dependency 'docs'"));
    }

    #[tokio::test]
    async fn test_load_from_folder() {
        let temp = TempDir::new().unwrap();
        tokio::fs::write(temp.path().join(CONFIG_FILE_NAME), SAMPLE).await.unwrap();

        let config = TemplateConfig::load_from_folder(temp.path()).await.unwrap();
        assert_eq!(config.variables[0].name, "project_name");
    }

    #[tokio::test]
    async fn test_load_from_missing() {
        let temp = TempDir::new().unwrap();
        let err = TemplateConfig::load_from_folder(temp.path()).await.unwrap_err();
        assert!(matches!(err, PlateError::ConfigNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_from_reports_file_on_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, "variables: {not: [a list}").await.unwrap();

        match TemplateConfig::load_from(&path).await.unwrap_err() {
            PlateError::ConfigParseError { file, .. } => {
                assert_eq!(file, path.display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
