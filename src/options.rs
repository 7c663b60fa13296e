//! Caller-supplied options for a resolution pass.
//!
//! Overrides come from the command line as `--var NAME=VALUE` pairs and from
//! YAML files given with `--var-file`. Files are merged in the order given and
//! `--var` pairs are applied last, so they win.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::PlateError;
use crate::variables::{Dependency, parse_yaml_string, split_namespace};

/// Options for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolveOptions {
    /// Explicit overrides by variable name. Namespaced names (`docs.title`)
    /// target dependency variables.
    pub vars: BTreeMap<String, Value>,

    /// Fail instead of prompting when a variable has no value.
    pub non_interactive: bool,

    /// Folder holding the template being resolved. Enables the `content` filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_folder: Option<PathBuf>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn non_interactive(mut self, non_interactive: bool) -> Self {
        self.non_interactive = non_interactive;
        self
    }

    #[must_use]
    pub fn with_template_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.template_folder = Some(folder.into());
        self
    }

    /// Apply `--var NAME=VALUE` arguments on top of the current overrides.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidVarArgument`] for an argument without `=`
    /// or with an empty name.
    pub fn apply_var_args<S: AsRef<str>>(&mut self, args: &[S]) -> crate::core::Result<()> {
        for arg in args {
            let (name, value) = parse_var_arg(arg.as_ref())?;
            self.vars.insert(name, value);
        }
        Ok(())
    }

    /// Merge the overrides in a YAML var file. Later files win.
    pub async fn apply_var_file(&mut self, path: &Path) -> Result<()> {
        let vars = load_var_file(path).await?;
        self.vars.extend(vars);
        Ok(())
    }

    /// Options for resolving the nested pass of `dependency`.
    ///
    /// The parent's overrides are passed down unless the dependency sets
    /// `dont-inherit-variables`. Overrides addressed to the dependency
    /// (`docs.title` for dependency `docs`) are always passed down, renamed
    /// to the name the dependency declares (`title`).
    pub fn for_dependency(&self, dependency: &Dependency) -> Self {
        let mut vars = if dependency.dont_inherit_variables {
            BTreeMap::new()
        } else {
            self.vars.clone()
        };

        for (name, value) in &self.vars {
            if let Some((namespace, local)) = split_namespace(name)
                && namespace == dependency.name
            {
                vars.insert(local.to_string(), value.clone());
            }
        }

        let template_folder = match &self.template_folder {
            Some(folder) if !dependency.template_url.is_empty() => {
                Some(folder.join(expand_path(&dependency.template_url)))
            }
            other => other.clone(),
        };

        Self {
            vars,
            non_interactive: self.non_interactive,
            template_folder,
        }
    }
}

/// Parse `NAME=VALUE`. The value is read as a YAML literal, so `port=8080`
/// yields a number and `tags=[a, b]` a list.
pub fn parse_var_arg(arg: &str) -> crate::core::Result<(String, Value)> {
    let invalid = || PlateError::InvalidVarArgument {
        arg: arg.to_string(),
    };

    let (name, raw) = arg.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    let value = if raw.is_empty() {
        Value::String(String::new())
    } else {
        parse_yaml_string(raw)?
    };
    Ok((name.to_string(), value))
}

/// Load a YAML mapping of overrides from `path`.
pub async fn load_var_file(path: &Path) -> Result<BTreeMap<String, Value>> {
    let path = expand_path(&path.to_string_lossy());
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read var file: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let vars: BTreeMap<String, Value> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse var file: {}", path.display()))?;

    tracing::debug!("Loaded {} overrides from {}", vars.len(), path.display());
    Ok(vars)
}

/// Expand `~` and environment variables in a user-supplied path. Paths that
/// fail to expand are used as given.
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            PathBuf::from(path)
        }
    }
}
