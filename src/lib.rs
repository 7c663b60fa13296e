//! plate - template variable resolution for project scaffolding
//!
//! A template declares the variables it needs in `plate.yml`. plate gives each
//! variable a concrete, typed value from command-line overrides, declared
//! defaults, interactive prompts, or another variable through a reference.
//!
//! # Architecture Overview
//!
//! Resolution is a two-phase pass over a single value map:
//! 1. Every variable gets a raw value. References are followed recursively
//!    with a bounded depth, so cycles are reported instead of looping.
//! 2. Every raw value is rendered with Tera against the complete map and then
//!    converted to its declared type.
//!
//! Since all raw values exist before rendering starts, variables may refer to
//! each other regardless of declaration order.
//!
//! # Modules
//!
//! - [`cli`] - `plate resolve` and `plate list`
//! - [`config`] - `plate.yml` loading and validation
//! - [`core`] - Error types and user-facing error reporting
//! - [`options`] - Overrides (`--var`, `--var-file`) and the non-interactive flag
//! - [`prompt`] - Interactive prompting
//! - [`resolver`] - The resolution engine
//! - [`templating`] - Tera rendering of variable values
//! - [`variables`] - Variable and dependency declarations, type conversion
//!
//! # Example `plate.yml`
//!
//! ```yaml
//! variables:
//!   - name: project_name
//!     description: Name of the generated project
//!     example: billing-service
//!
//!   - name: port
//!     type: int
//!     default: 8080
//!
//!   - name: image
//!     default: "registry.local/{{ project_name }}:latest"
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
//! ```bash
//! plate resolve --template-folder . --var project_name=billing --non-interactive
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod options;
pub mod prompt;
pub mod resolver;
pub mod templating;
pub mod variables;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
