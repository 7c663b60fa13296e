//! Template rendering for variable values.
//!
//! Variable values may embed Tera expressions that refer to other variables:
//!
//! ```yaml
//! variables:
//!   - name: project_name
//!   - name: image
//!     default: "registry.local/{{ project_name | lower }}"
//!   - name: docs_title
//!     default: "{{ docs.title }}"
//! ```
//!
//! Rendering happens after every raw value is known, so expressions may refer
//! to variables declared later in the file or imported from dependencies.
//!
//! # Template Context
//!
//! Templates are rendered against the resolved value map:
//! - every variable under its own name
//! - namespaced variables also as nested maps (`docs.title`)
//! - `PlateConfigVars`, `PlateConfigDeps` and `This` for introspection
//!
//! # Custom Filters
//!
//! - `content`: Read a file from the template folder (`{{ 'LICENSE' | content }}`)

pub mod filters;

mod error;
mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use renderer::{MAX_RENDER_ATTEMPTS, Renderer, TeraRenderer};
