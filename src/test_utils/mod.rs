//! Test utilities for plate
//!
//! Helpers shared by unit tests and the integration suite:
//! - Logging setup that plays well with the test harness
//! - A scripted [`Prompter`] that answers prompts from a fixed list
//! - Sample `plate.yml` fixtures

pub mod fixtures;

pub use fixtures::ConfigFixture;

use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::{PlateError, Result};
use crate::prompt::Prompter;
use crate::variables::Variable;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Initialises the tracing subscriber once, no matter how often it is called.
/// Uses `level` if given, otherwise `RUST_LOG`. Without either, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

/// [`Prompter`] that replays canned answers and records what it was asked.
///
/// Running out of answers behaves like a closed input stream.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// A prompter with no answers; any prompt fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Full names of the variables shown so far, in order.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn show_variable(&mut self, variable: &Variable) -> Result<()> {
        self.shown.push(variable.full_name().to_string());
        Ok(())
    }

    fn prompt(&mut self, _label: &str) -> Result<String> {
        self.answers.pop_front().ok_or_else(|| PlateError::PromptFailed {
            reason: "no scripted answer left".to_string(),
        })
    }
}
