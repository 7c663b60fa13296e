//! Variable resolution engine.
//!
//! This module turns the variable declarations of a template into concrete,
//! typed values. It handles value-source precedence, reference chains between
//! variables, namespaced dependency variables, and cross-variable templating.
//!
//! # Architecture Overview
//!
//! Resolution runs in **two phases** over the same value map:
//!
//! ## Phase 1: Raw values ([`Resolver`])
//! - **Purpose**: Give every variable in the catalog a raw, unrendered value
//! - **Sources**: Override, then default (non-interactive), then prompt
//! - **References**: A variable with `reference: other` takes `other`'s raw
//!   value, following chains recursively
//! - **Result**: Every catalog variable has an entry in the map
//!
//! ## Phase 2: Render and convert
//! - **Purpose**: Expand template expressions and coerce to declared types
//! - **Operations**: [`Renderer::render`] against the complete map, then
//!   [`TypeConverter::convert`]
//! - **Result**: Final typed values
//!
//! Because every raw value exists before anything is rendered, a variable may
//! refer to another declared later in the file, or to a dependency's variable,
//! without any ordering between declarations.
//!
//! # Value-Source Precedence
//!
//! For a variable without a reference:
//! 1. **Override**: `--var name=value` or a var file, used verbatim
//! 2. **Default**: used only in non-interactive mode
//! 3. **Failure**: non-interactive with no default is
//!    [`PlateError::MissingVariableNonInteractive`]
//! 4. **Prompt**: the user is asked; an empty answer accepts the default
//!    (null when there is none), anything else is parsed as a YAML literal
//!
//! An empty answer always means "use the default". An explicit empty string
//! is entered as `""`. Null is rejected for `enum` variables when types are
//! converted, so an `enum` without a default needs a real answer.
//!
//! # Reference Chains
//!
//! Chains are followed with a depth counter instead of a visited set. A chain
//! longer than [`MAX_REFERENCE_DEPTH`] hops is reported as
//! [`PlateError::CyclicReference`], which bounds true cycles while letting
//! several variables share a target.
//!
//! # Introspection
//!
//! The map is seeded with overrides and then with `PlateConfigVars`,
//! `PlateConfigDeps` and `This` (see [`context`]), so templates can read the
//! configuration itself.
//!
//! # Example
//!
//! ```rust,no_run
//! use plate_cli::config::TemplateConfig;
//! use plate_cli::options::ResolveOptions;
//! use plate_cli::prompt::TerminalPrompter;
//! use plate_cli::resolver::{Collaborators, resolve_all_variables};
//! use plate_cli::templating::TeraRenderer;
//! use plate_cli::variables::YamlTypeConverter;
//!
//! # fn example(config: TemplateConfig) -> plate_cli::core::Result<()> {
//! let options = ResolveOptions::new().with_var("project_name", "demo");
//! let renderer = TeraRenderer::new();
//! let mut prompter = TerminalPrompter::stdio();
//! let mut collaborators = Collaborators::new(&renderer, &YamlTypeConverter, &mut prompter);
//!
//! let values = resolve_all_variables(&options, &config, &config, None, &mut collaborators)?;
//! println!("{}", values["project_name"]);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod context;

use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::TemplateConfig;
use crate::core::{PlateError, Result};
use crate::options::ResolveOptions;
use crate::prompt::{ENTER_VALUE_LABEL, Prompter};
use crate::templating::Renderer;
use crate::variables::{Dependency, TypeConverter, Variable, parse_yaml_string};

pub use catalog::{Catalog, build_catalog};
pub use context::{CONFIG_DEPS_KEY, CONFIG_VARS_KEY, THIS_KEY, introspection_entries};

/// Maximum number of reference hops followed before a chain is treated as cyclic.
pub const MAX_REFERENCE_DEPTH: usize = 20;

/// Resolved values by variable name.
pub type VariableValues = BTreeMap<String, Value>;

/// The pluggable parts of a resolution pass.
pub struct Collaborators<'a> {
    pub renderer: &'a dyn Renderer,
    pub converter: &'a dyn TypeConverter,
    pub prompter: &'a mut dyn Prompter,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        renderer: &'a dyn Renderer,
        converter: &'a dyn TypeConverter,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            renderer,
            converter,
            prompter,
        }
    }
}

/// Produces raw values for variables (Phase 1).
pub struct Resolver<'a> {
    options: &'a ResolveOptions,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Resolver<'a> {
    pub fn new(options: &'a ResolveOptions, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            options,
            prompter,
        }
    }

    /// Raw value of `variable`.
    ///
    /// Values already in `resolved` are returned as is. `depth` counts the
    /// reference hops taken to reach `variable`; callers start at 0.
    ///
    /// # Errors
    ///
    /// - [`PlateError::CyclicReference`] when `depth` exceeds [`MAX_REFERENCE_DEPTH`]
    /// - [`PlateError::MissingReference`] when a reference target is not in `catalog`
    /// - any error of the value source (see [`Resolver::value_from_source`])
    pub fn resolve(
        &mut self,
        variable: &Variable,
        catalog: &Catalog,
        resolved: &VariableValues,
        depth: usize,
    ) -> Result<Value> {
        if let Some(value) = resolved.get(&variable.name) {
            return Ok(value.clone());
        }

        if depth > MAX_REFERENCE_DEPTH {
            return Err(PlateError::CyclicReference {
                variable: variable.name.clone(),
                reference: variable.reference.clone().unwrap_or_default(),
            });
        }

        let Some(reference) = &variable.reference else {
            return self.value_from_source(variable);
        };

        if let Some(value) = resolved.get(reference) {
            return Ok(value.clone());
        }

        let target = catalog.get(reference).ok_or_else(|| PlateError::MissingReference {
            variable: variable.name.clone(),
            reference: reference.clone(),
        })?;

        tracing::trace!("Following reference {} -> {} (depth {})", variable.name, reference, depth + 1);
        self.resolve(target, catalog, resolved, depth + 1)
    }

    /// Raw value of a variable without a reference: override, then default
    /// (non-interactive), then prompt.
    ///
    /// # Errors
    ///
    /// - [`PlateError::MissingVariableNonInteractive`] when nothing supplies a value
    /// - [`PlateError::PromptFailed`] or [`PlateError::InvalidYaml`] from prompting
    pub fn value_from_source(&mut self, variable: &Variable) -> Result<Value> {
        if let Some(value) = self.options.vars.get(&variable.name) {
            tracing::info!(
                "Using value specified via command line options for variable '{}': {}",
                variable.full_name(),
                value
            );
            return Ok(value.clone());
        }

        if self.options.non_interactive {
            return match &variable.default {
                Some(default) => {
                    tracing::info!(
                        "Using default value for variable '{}': {}",
                        variable.full_name(),
                        default
                    );
                    Ok(default.clone())
                }
                None => Err(PlateError::MissingVariableNonInteractive {
                    variable: variable.full_name().to_string(),
                }),
            };
        }

        self.prompt_for(variable)
    }

    fn prompt_for(&mut self, variable: &Variable) -> Result<Value> {
        self.prompter.show_variable(variable)?;
        let answer = self.prompter.prompt(ENTER_VALUE_LABEL)?;

        if answer.is_empty() {
            let default = variable.default.clone().unwrap_or(Value::Null);
            tracing::info!("Using default value for variable '{}': {}", variable.full_name(), default);
            return Ok(default);
        }

        parse_yaml_string(&answer)
    }
}

/// Resolve every variable visible in `config` to its final typed value.
///
/// `root_config` is the top-level template and `current_dependency` the
/// dependency whose template `config` is, if any; both only feed the
/// introspection entries.
///
/// The returned map holds the overrides, the introspection entries and one
/// entry per catalog variable. Any error aborts the pass.
pub fn resolve_all_variables(
    options: &ResolveOptions,
    config: &TemplateConfig,
    root_config: &TemplateConfig,
    current_dependency: Option<&Dependency>,
    collaborators: &mut Collaborators<'_>,
) -> Result<VariableValues> {
    let span = tracing::debug_span!(
        "resolve_variables",
        dependency = current_dependency.map_or("<root>", |d| d.name.as_str())
    );
    let _guard = span.enter();

    let mut values = options.vars.clone();
    values.extend(introspection_entries(options, config, root_config, current_dependency)?);

    let catalog = build_catalog(config);
    tracing::debug!("Resolving {} variables", catalog.len());

    let mut resolver = Resolver::new(options, &mut *collaborators.prompter);
    for variable in catalog.values() {
        let raw = resolver.resolve(variable, &catalog, &values, 0)?;
        values.insert(variable.name.clone(), raw);
    }

    for variable in catalog.values() {
        let raw = values.get(&variable.name).cloned().unwrap_or(Value::Null);
        let rendered = collaborators.renderer.render(&variable.name, &raw, &values, options)?;
        let typed = collaborators.converter.convert(rendered, variable)?;
        tracing::debug!("Resolved '{}' = {}", variable.full_name(), typed);
        values.insert(variable.name.clone(), typed);
    }

    Ok(values)
}
