//! Error handling for plate
//!
//! This module provides the error taxonomy for variable resolution and the
//! user-friendly reporting used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the failure mode
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`PlateError`] - Closed enumeration of every failure a resolution pass can produce
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! Every resolution error is fatal: a pass that hits one aborts immediately and
//! returns no partial variable map. Variants carry the variable and reference
//! names involved so the message is actionable on its own.
//!
//! # Examples
//!
//! ```rust,no_run
//! use plate_cli::core::{PlateError, user_friendly_error};
//!
//! let error = PlateError::MissingReference {
//!     variable: "b".to_string(),
//!     reference: "z".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for plate operations.
///
/// # Error Categories
///
/// ## Resolution
/// - [`MissingVariableNonInteractive`] - No override, no default, prompting disabled
/// - [`MissingReference`] - A reference points at a variable that does not exist
/// - [`CyclicReference`] - A reference chain exceeded the maximum depth
/// - [`PromptFailed`] - Reading interactive input failed
///
/// ## Rendering and Conversion
/// - [`Template`] - A variable's value failed to render
/// - [`InfiniteRenderLoop`] - Rendering never reached a fixed point
/// - [`InvalidVariableValue`] - A rendered value cannot be coerced to the declared type
/// - [`InvalidYaml`] - A literal could not be parsed as YAML
///
/// ## Configuration
/// - [`ConfigNotFound`], [`ConfigParseError`], [`ConfigValidationError`]
/// - [`InvalidVarArgument`] - Malformed `--var` argument
///
/// [`MissingVariableNonInteractive`]: PlateError::MissingVariableNonInteractive
/// [`MissingReference`]: PlateError::MissingReference
/// [`CyclicReference`]: PlateError::CyclicReference
/// [`PromptFailed`]: PlateError::PromptFailed
/// [`Template`]: PlateError::Template
/// [`InfiniteRenderLoop`]: PlateError::InfiniteRenderLoop
/// [`InvalidVariableValue`]: PlateError::InvalidVariableValue
/// [`InvalidYaml`]: PlateError::InvalidYaml
/// [`ConfigNotFound`]: PlateError::ConfigNotFound
/// [`ConfigParseError`]: PlateError::ConfigParseError
/// [`ConfigValidationError`]: PlateError::ConfigValidationError
/// [`InvalidVarArgument`]: PlateError::InvalidVarArgument
#[derive(Error, Debug)]
pub enum PlateError {
    /// A variable has no override and no default, and prompting is disabled.
    ///
    /// # Fields
    /// - `variable`: Full display name of the variable
    #[error(
        "Variable '{variable}' does not have a default, no value was specified with --var, \
         and --non-interactive is set, so cannot prompt for a value"
    )]
    MissingVariableNonInteractive {
        /// Full display name of the variable
        variable: String,
    },

    /// A variable references another variable that is not in the catalog.
    #[error("Variable '{variable}' references unknown variable '{reference}'")]
    MissingReference {
        /// The variable declaring the reference
        variable: String,
        /// The missing reference target
        reference: String,
    },

    /// A reference chain exceeded the maximum depth.
    ///
    /// Raised when following references goes deeper than
    /// [`MAX_REFERENCE_DEPTH`](crate::resolver::MAX_REFERENCE_DEPTH) hops, which
    /// means the chain loops back on itself or is pathologically long.
    #[error("Variable '{variable}' seems to have a cyclic reference with variable '{reference}'")]
    CyclicReference {
        /// The variable at which the depth bound was exceeded
        variable: String,
        /// That variable's reference target
        reference: String,
    },

    /// Rendering a variable's value failed.
    #[error("Failed to render variable '{variable}': {source}")]
    Template {
        /// The variable being rendered
        variable: String,
        /// The underlying template error
        source: TemplateError,
    },

    /// Rendering never stabilised.
    #[error("Variable '{variable}' did not stop changing after {attempts} render passes")]
    InfiniteRenderLoop {
        /// The variable being rendered
        variable: String,
        /// Number of passes attempted
        attempts: usize,
    },

    /// A value cannot be converted to the variable's declared type.
    #[error("Value '{value}' is not a valid {expected} for variable '{variable}'")]
    InvalidVariableValue {
        /// The variable being converted
        variable: String,
        /// The declared type (or enum options)
        expected: String,
        /// The offending value, rendered for display
        value: String,
    },

    /// A literal could not be parsed as YAML.
    #[error("Unable to parse '{input}' as YAML: {reason}")]
    InvalidYaml {
        /// The text that failed to parse
        input: String,
        /// Parser error message
        reason: String,
    },

    /// Reading interactive input failed.
    #[error("Failed to read input: {reason}")]
    PromptFailed {
        /// Why the prompt failed
        reason: String,
    },

    /// A `--var` argument is not of the form `NAME=VALUE`.
    #[error("Invalid variable argument '{arg}': expected NAME=VALUE")]
    InvalidVarArgument {
        /// The raw argument
        arg: String,
    },

    /// The template configuration file does not exist.
    #[error("Template config not found: {path}")]
    ConfigNotFound {
        /// Path that was checked
        path: String,
    },

    /// The template configuration file is not valid YAML for the expected schema.
    #[error("Invalid template config {file}: {reason}")]
    ConfigParseError {
        /// The file being parsed
        file: String,
        /// Parser error message
        reason: String,
    },

    /// The template configuration parsed but failed validation.
    #[error("Template config validation failed: {reason}")]
    ConfigValidationError {
        /// What was wrong
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Result alias used by the resolution engine.
pub type Result<T, E = PlateError> = std::result::Result<T, E>;

/// Error context wrapper that provides user-friendly error information.
///
/// # Examples
///
/// ```rust,no_run
/// use plate_cli::core::{PlateError, ErrorContext};
///
/// let context = ErrorContext::new(PlateError::ConfigNotFound { path: "plate.yml".into() })
///     .with_suggestion("Create a plate.yml file in your template folder")
///     .with_details("plate reads variables from plate.yml");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying plate error
    pub error: PlateError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PlateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error. Displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error. Displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognises [`PlateError`] variants, [`std::io::Error`] and [`serde_yaml::Error`];
/// everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<PlateError>() {
        Ok(plate_error) => return create_error_context(plate_error),
        Err(other) => other,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PlateError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details("A required file or directory could not be found");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PlateError::Other {
                    message: format_chain(&error),
                })
                .with_suggestion("Check the file permissions and ownership")
                .with_details("plate does not have permission to read a required file");
            }
            _ => {}
        }
    }

    if error.downcast_ref::<serde_yaml::Error>().is_some() {
        return ErrorContext::new(PlateError::Other {
            message: format_chain(&error),
        })
        .with_suggestion("Check the YAML syntax: indentation, colons after keys, and quoting")
        .with_details("YAML errors usually come from inconsistent indentation or unquoted special characters");
    }

    ErrorContext::new(PlateError::Other {
        message: format_chain(&error),
    })
}

/// Render an error with its cause chain appended.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Attach suggestions and details to a specific [`PlateError`].
fn create_error_context(error: PlateError) -> ErrorContext {
    match &error {
        PlateError::MissingVariableNonInteractive { variable } => {
            let suggestion = format!(
                "Pass a value with --var {variable}=VALUE, add a default in plate.yml, or drop --non-interactive"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("In non-interactive mode every variable needs an override or a default")
        }

        PlateError::MissingReference { reference, .. } => {
            let suggestion =
                format!("Declare a variable named '{reference}' or fix the reference name");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("References may point at local variables or at namespaced dependency variables (dep.name)")
        }

        PlateError::CyclicReference { .. } => ErrorContext::new(error)
            .with_suggestion("Review the 'reference' fields in plate.yml and break the loop")
            .with_details(format!(
                "Reference chains may be at most {} hops long",
                crate::resolver::MAX_REFERENCE_DEPTH
            )),

        PlateError::Template { source, .. } => {
            let details = source.format_with_context();
            ErrorContext::new(error)
                .with_suggestion(
                    "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
                     Namespaced variables are reachable as {{ dep.var }}",
                )
                .with_details(details)
        }

        PlateError::InfiniteRenderLoop { .. } => ErrorContext::new(error)
            .with_suggestion("Make sure no variable's value renders to a template that refers back to itself")
            .with_details("Values are rendered repeatedly until they stop changing"),

        PlateError::InvalidVariableValue { variable, expected, .. } => {
            let suggestion = format!("Provide a {expected} value for '{variable}'");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        PlateError::InvalidVarArgument { .. } => ErrorContext::new(error)
            .with_suggestion("Use --var NAME=VALUE, for example --var project_name=demo"),

        PlateError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Point --template-folder at a directory containing plate.yml"),

        PlateError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the YAML syntax in plate.yml: indentation, colons after keys, and quoting"),

        PlateError::PromptFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run with --non-interactive and pass values with --var when stdin is not a terminal"),

        _ => ErrorContext::new(error),
    }
}
