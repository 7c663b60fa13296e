//! Introspection entries exposed to templates.
//!
//! Besides the variables themselves, templates can look at the configuration
//! being processed:
//!
//! - `PlateConfigVars`: variables declared by the root template, by name
//!   (`{{ PlateConfigVars.port.default }}`)
//! - `PlateConfigDeps`: dependencies of the root template, by name
//!   (`{{ PlateConfigDeps.docs['output-folder'] }}`)
//! - `This`: the template currently being processed, with `Config`, `Options`
//!   and `CurrentDep` (null at the root)

use serde::Serialize;
use serde_json::{Map, Value};

use super::VariableValues;
use crate::config::TemplateConfig;
use crate::core::{PlateError, Result};
use crate::options::ResolveOptions;
use crate::variables::Dependency;

/// Root template variables by name.
pub const CONFIG_VARS_KEY: &str = "PlateConfigVars";

/// Root template dependencies by name.
pub const CONFIG_DEPS_KEY: &str = "PlateConfigDeps";

/// Descriptor of the template currently being processed.
pub const THIS_KEY: &str = "This";

/// Build the introspection entries for a resolution pass.
pub fn introspection_entries(
    options: &ResolveOptions,
    config: &TemplateConfig,
    root_config: &TemplateConfig,
    current_dependency: Option<&Dependency>,
) -> Result<VariableValues> {
    let mut entries = VariableValues::new();

    let mut vars = Map::new();
    for variable in &root_config.variables {
        vars.insert(variable.name.clone(), to_value(variable)?);
    }
    entries.insert(CONFIG_VARS_KEY.to_string(), Value::Object(vars));

    let mut deps = Map::new();
    for dependency in &root_config.dependencies {
        deps.insert(dependency.name.clone(), to_value(dependency)?);
    }
    entries.insert(CONFIG_DEPS_KEY.to_string(), Value::Object(deps));

    let mut this = Map::new();
    this.insert("Config".to_string(), to_value(config)?);
    this.insert("Options".to_string(), to_value(options)?);
    this.insert("CurrentDep".to_string(), to_value(&current_dependency)?);
    entries.insert(THIS_KEY.to_string(), Value::Object(this));

    Ok(entries)
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| PlateError::Other {
        message: format!("Failed to expose configuration to templates: {e}"),
    })
}
