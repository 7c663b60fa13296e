//! Core types and error handling for plate.
//!
//! - [`error`] - The [`PlateError`] taxonomy and user-friendly error display

pub mod error;

pub use error::{ErrorContext, PlateError, Result, user_friendly_error};
