//! Test fixtures for creating sample template configurations.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Sample `plate.yml` contents.
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
    pub name: String,
}

impl ConfigFixture {
    /// Every variable has a default, so the config resolves non-interactively
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
variables:
  - name: project_name
    description: Name of the generated project
    default: demo
  - name: port
    type: int
    default: 8080
  - name: service_name
    reference: project_name
"#
            .trim()
            .to_string(),
        }
    }

    /// Variables that refer to each other through templates and dependencies
    pub fn with_dependency() -> Self {
        Self {
            name: "with_dependency".to_string(),
            content: r#"
variables:
  - name: project_name
    default: demo
  - name: summary
    default: "{{ docs.title }} on port {{ port }}"
  - name: port
    type: int
    default: "{{ 8000 + 80 }}"

dependencies:
  - name: docs
    template-url: ../docs
    output-folder: docs
    variables:
      - name: title
        default: "{{ project_name | upper }} docs"
"#
            .trim()
            .to_string(),
        }
    }

    /// A variable with no default
    pub fn missing_default() -> Self {
        Self {
            name: "missing_default".to_string(),
            content: r#"
variables:
  - name: project_name
    description: Name of the generated project
    example: my-service
"#
            .trim()
            .to_string(),
        }
    }

    /// Two variables referencing each other
    pub fn cyclic() -> Self {
        Self {
            name: "cyclic".to_string(),
            content: r#"
variables:
  - name: a
    reference: b
  - name: b
    reference: a
"#
            .trim()
            .to_string(),
        }
    }

    /// Config with invalid YAML
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
variables:
  - name: project_name
    default: [unclosed
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture as `plate.yml` in `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
