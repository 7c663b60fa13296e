//! Integration test suite for plate
//!
//! End-to-end tests that run the `plate` binary against template folders in
//! temporary directories, plus library-level tests of complete resolution
//! passes.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: Shared helpers for building template folders
//! - **content_filter**: The `content` filter in variable values
//! - **list**: `plate list`
//! - **resolution**: Library-level resolution passes, including nested dependency passes
//! - **resolve**: `plate resolve`

mod common;

mod content_filter;
mod list;
mod resolution;
mod resolve;
