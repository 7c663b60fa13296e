//! Variable rendering with Tera.
//!
//! [`TeraRenderer`] expands template expressions inside variable values using
//! every value resolved so far as the context. Strings are rendered
//! repeatedly until they stop changing, so a value that renders to another
//! template expression keeps being expanded. Text inside
//! `{% raw %}...{% endraw %}` is emitted literally and never re-rendered.

use regex::Regex;
use serde_json::{Map, Value};
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use super::filters;
use crate::core::{PlateError, Result};
use crate::options::ResolveOptions;
use crate::resolver::VariableValues;
use crate::variables::NAMESPACE_SEPARATOR;

/// Maximum number of render passes over a single string.
pub const MAX_RENDER_ATTEMPTS: usize = 15;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
/// This represents a 50% similarity threshold for variable name suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Renders a raw variable value against the full value map.
pub trait Renderer {
    /// Render `raw`, the value of `variable`, against `values`.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::Template`] for template failures and
    /// [`PlateError::InfiniteRenderLoop`] if rendering never stabilises.
    fn render(
        &self,
        variable: &str,
        raw: &Value,
        values: &VariableValues,
        options: &ResolveOptions,
    ) -> Result<Value>;
}

/// Default [`Renderer`] backed by Tera.
///
/// - Strings are rendered as templates
/// - Sequences render each element, mappings render keys and values
/// - Numbers, booleans and null pass through
///
/// When the options name a template folder, the `content` filter is available
/// for embedding files from it: `{{ 'LICENSE.txt' | content }}`.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    max_attempts: usize,
}

impl Default for TeraRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TeraRenderer {
    fn render(
        &self,
        variable: &str,
        raw: &Value,
        values: &VariableValues,
        options: &ResolveOptions,
    ) -> Result<Value> {
        if !contains_template_syntax(raw) {
            return Ok(raw.clone());
        }

        let mut tera = Tera::default();
        if let Some(folder) = &options.template_folder {
            tera.register_filter("content", filters::create_content_filter(folder.clone()));
        }

        let context = Self::build_context(values)?;
        self.render_value(&mut tera, variable, raw, &context, values)
    }
}

impl TeraRenderer {
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_RENDER_ATTEMPTS,
        }
    }

    /// Override the number of render passes allowed per string.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn render_value(
        &self,
        tera: &mut Tera,
        variable: &str,
        value: &Value,
        context: &TeraContext,
        values: &VariableValues,
    ) -> Result<Value> {
        match value {
            Value::String(s) => {
                self.render_string(tera, variable, s, context, values).map(Value::String)
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.render_value(tera, variable, item, context, values))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut rendered = Map::with_capacity(map.len());
                for (key, item) in map {
                    let key = self.render_string(tera, variable, key, context, values)?;
                    let item = self.render_value(tera, variable, item, context, values)?;
                    rendered.insert(key, item);
                }
                Ok(Value::Object(rendered))
            }
            other => Ok(other.clone()),
        }
    }

    /// Render `template` until the output stops changing.
    ///
    /// `{% raw %}` blocks are swapped for placeholders first and their bodies
    /// restored after the last pass, so they come out as literal text.
    fn render_string(
        &self,
        tera: &mut Tera,
        variable: &str,
        template: &str,
        context: &TeraContext,
        values: &VariableValues,
    ) -> Result<String> {
        let (mut last, literals) = protect_literal_blocks(template);

        for attempt in 1..=self.max_attempts {
            if !has_template_syntax(&last) {
                return Ok(restore_literal_blocks(&last, &literals));
            }

            let output = tera.render_str(&last, context).map_err(|e| PlateError::Template {
                variable: variable.to_string(),
                source: Self::parse_tera_error(&e, variable, &last, values),
            })?;

            if output == last {
                return Ok(restore_literal_blocks(&output, &literals));
            }

            tracing::trace!("Render pass {} for '{}' produced: {}", attempt, variable, output);
            last = output;
        }

        Err(PlateError::InfiniteRenderLoop {
            variable: variable.to_string(),
            attempts: self.max_attempts,
        })
    }

    /// Build the Tera context from the value map.
    ///
    /// Every entry is inserted under its own key. Namespaced keys (`docs.title`)
    /// are also nested (`docs: { title: ... }`) so templates can use dot syntax,
    /// unless the namespace is already taken by a non-map value.
    pub(crate) fn build_context(values: &VariableValues) -> Result<TeraContext> {
        let mut root = Map::new();
        for (key, value) in values {
            root.insert(key.clone(), value.clone());
        }

        for (key, value) in values {
            if key.contains(NAMESPACE_SEPARATOR) {
                let path: Vec<&str> = key.split(NAMESPACE_SEPARATOR).collect();
                nest(&mut root, &path, value);
            }
        }

        TeraContext::from_value(Value::Object(root)).map_err(|e| PlateError::Other {
            message: format!("Failed to build template context: {e}"),
        })
    }

    /// Parse a Tera error into a structured TemplateError
    fn parse_tera_error(
        error: &tera::Error,
        variable: &str,
        template: &str,
        values: &VariableValues,
    ) -> TemplateError {
        let messages = Self::error_chain(error);
        let joined = messages.join("\n");

        let line_number = Self::extract_line_from_tera_error(error);
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template, line, 2))
            .filter(|lines| !lines.is_empty());

        let location = Box::new(ErrorLocation {
            variable: variable.to_string(),
            line_number,
            context_lines,
        });

        if let Some(name) = Self::extract_variable_name(&joined) {
            let available_variables = Self::extract_available_variables(values);
            let suggestions = Self::find_similar_variables(&name, &available_variables);
            return TemplateError::VariableNotFound {
                variable: name,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        if let Some(message) = messages.iter().find(|m| m.contains(filters::CONTENT_FILTER_ERROR)) {
            return TemplateError::ContentFilterError {
                message: message.clone(),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: Self::format_tera_error(error),
            location,
        }
    }

    fn error_chain(error: &tera::Error) -> Vec<String> {
        use std::error::Error;

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }
        all_messages
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Names a template can refer to: resolved variables, in dot syntax.
    fn extract_available_variables(values: &VariableValues) -> Vec<String> {
        values.keys().cloned().collect()
    }

    /// Find similar variable names using Levenshtein distance
    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> = available
            .iter()
            .map(|var| {
                let distance = levenshtein(target, var);
                (var.clone(), distance)
            })
            .collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Extract context lines around an error location
    ///
    /// Returns up to `context_size` lines before and after the error line,
    /// along with their line numbers (1-indexed).
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, line.to_string()))
            .collect()
    }

    /// Extract line number from Tera error message
    ///
    /// Tera includes line:column information in parse error messages.
    /// Examples: "1:7", "15:23"
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{:?}", error);

        let re = Regex::new(r"(\d+):(\d+)").ok()?;
        re.captures(&error_msg)
            .and_then(|caps| caps.get(1))
            .and_then(|line| line.as_str().parse::<usize>().ok())
    }

    /// Format a Tera error, dropping internal template names like '__tera_one_off'.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let messages: Vec<String> = Self::error_chain(error)
            .into_iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                    .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|cleaned| {
                !cleaned.is_empty()
                    && cleaned != "Template rendering failed"
                    && cleaned != "Template syntax error"
            })
            .collect();

        if messages.is_empty() {
            "Template syntax error".to_string()
        } else {
            messages.join("\n  -> ")
        }
    }
}

fn nest(root: &mut Map<String, Value>, path: &[&str], value: &Value) {
    match path {
        [] => {}
        [last] => {
            root.entry(last.to_string()).or_insert_with(|| value.clone());
        }
        [first, rest @ ..] => {
            let entry =
                root.entry(first.to_string()).or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = entry {
                nest(child, rest, value);
            }
        }
    }
}

/// Replace each `{% raw %}...{% endraw %}` block with a placeholder.
///
/// Returns the protected text and the block bodies, indexed by placeholder
/// number. Whitespace control (`{%- raw -%}`) trims the same way Tera does.
fn protect_literal_blocks(template: &str) -> (String, Vec<String>) {
    if !template.contains("raw") {
        return (template.to_string(), Vec::new());
    }
    let Ok(re) = Regex::new(r"(?s)\{%(-?)\s*raw\s*(-?)%\}(.*?)\{%(-?)\s*endraw\s*(-?)%\}")
    else {
        return (template.to_string(), Vec::new());
    };

    let mut protected = String::with_capacity(template.len());
    let mut literals = Vec::new();
    let mut rest_start = 0;
    let mut trim_next = false;

    for caps in re.captures_iter(template) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(3)) else {
            continue;
        };
        let flag = |i: usize| caps.get(i).is_some_and(|m| !m.as_str().is_empty());

        let before = &template[rest_start..whole.start()];
        let before = if trim_next { before.trim_start() } else { before };
        protected.push_str(if flag(1) { before.trim_end() } else { before });

        let mut body = body.as_str();
        if flag(2) {
            body = body.trim_start();
        }
        if flag(4) {
            body = body.trim_end();
        }

        protected.push_str(&literal_placeholder(literals.len()));
        literals.push(body.to_string());

        trim_next = flag(5);
        rest_start = whole.end();
    }

    let tail = &template[rest_start..];
    protected.push_str(if trim_next { tail.trim_start() } else { tail });

    if !literals.is_empty() {
        tracing::trace!("Protected {} literal block(s)", literals.len());
    }
    (protected, literals)
}

/// Put the literal block bodies back in place of their placeholders.
fn restore_literal_blocks(content: &str, literals: &[String]) -> String {
    let mut result = content.to_string();
    for (index, literal) in literals.iter().enumerate() {
        result = result.replace(&literal_placeholder(index), literal);
    }
    result
}

fn literal_placeholder(index: usize) -> String {
    format!("__PLATE_LITERAL_BLOCK_{index}__")
}

/// Whether a string contains Tera delimiters.
fn has_template_syntax(s: &str) -> bool {
    s.contains("{{") || s.contains("{%") || s.contains("{#")
}

/// Whether any string inside `value` contains Tera delimiters.
fn contains_template_syntax(value: &Value) -> bool {
    match value {
        Value::String(s) => has_template_syntax(s),
        Value::Array(items) => items.iter().any(contains_template_syntax),
        Value::Object(map) => {
            map.iter().any(|(k, v)| has_template_syntax(k) || contains_template_syntax(v))
        }
        _ => false,
    }
}
