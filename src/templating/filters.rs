//! Custom Tera filters for variable rendering.
//!
//! # Available Filters
//!
//! ## `content`
//!
//! Reads a file from the template folder and embeds its text:
//!
//! ```text
//! {{ 'snippets/license-header.txt' | content }}
//! ```
//!
//! The embedded text is rendered on the next pass like any other output, so
//! files may themselves contain template expressions.
//!
//! Paths must be relative and may not escape the template folder.

use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Prefix of every error message produced by the `content` filter.
pub const CONTENT_FILTER_ERROR: &str = "content filter error";

/// Largest file the `content` filter will read (1 MiB).
pub const MAX_CONTENT_FILE_SIZE: u64 = 1024 * 1024;

/// Validates a path given to the `content` filter.
///
/// This function ensures that:
/// 1. The path is relative (not absolute)
/// 2. The path doesn't traverse outside the template folder using `..`
/// 3. The file exists, is a regular file, and is at most [`MAX_CONTENT_FILE_SIZE`] bytes
///
/// Returns the canonicalized absolute path to the file if all checks pass.
pub fn validate_content_path(path_str: &str, template_folder: &Path) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        bail!("Absolute paths are not allowed. Path '{}' must be relative to the template folder.", path_str);
    }

    let mut depth: i32 = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    bail!("Path '{}' escapes the template folder.", path_str);
                }
            }
            Component::CurDir => {}
            _ => {
                bail!("Invalid path component in '{}'. Only relative paths are allowed.", path_str);
            }
        }
    }

    let full_path = template_folder.join(path);

    if !full_path.is_file() {
        bail!("File not found: '{}' (looked for {})", path_str, full_path.display());
    }

    let canonical_path = full_path
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize path: {}", full_path.display()))?;

    let canonical_folder = template_folder.canonicalize().with_context(|| {
        format!("Failed to canonicalize template folder: {}", template_folder.display())
    })?;

    // Symlinks may still point elsewhere
    if !canonical_path.starts_with(&canonical_folder) {
        bail!(
            "Path '{}' resolves to '{}' which is outside the template folder '{}'",
            path_str,
            canonical_path.display(),
            canonical_folder.display()
        );
    }

    let size = canonical_path
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", canonical_path.display()))?
        .len();
    if size > MAX_CONTENT_FILE_SIZE {
        bail!(
            "File '{}' is too large ({} bytes, limit {} bytes)",
            path_str,
            size,
            MAX_CONTENT_FILE_SIZE
        );
    }

    Ok(canonical_path)
}

/// Creates the `content` filter bound to `template_folder`.
pub fn create_content_filter(template_folder: PathBuf) -> impl tera::Filter + 'static {
    move |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let path_str = value
            .as_str()
            .ok_or_else(|| tera::Error::msg(format!("{CONTENT_FILTER_ERROR}: expected a string path")))?;

        let file_path = validate_content_path(path_str, &template_folder)
            .map_err(|e| tera::Error::msg(format!("{CONTENT_FILTER_ERROR}: {e}")))?;

        let content = std::fs::read_to_string(&file_path)
            .map_err(|e| tera::Error::msg(format!("{CONTENT_FILTER_ERROR}: {e}")))?;

        tracing::debug!("Embedded {} ({} bytes)", file_path.display(), content.len());
        Ok(tera::Value::String(content))
    }
}
