//! Command-line interface for plate.
//!
//! # Commands
//!
//! - `resolve` - Resolve a template's variables and print the values
//! - `list` - Show the variables a template declares
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - No logging
//!
//! Logs go to stderr; command output goes to stdout. `RUST_LOG` overrides the
//! level chosen by the flags.
//!
//! # Examples
//!
//! ```bash
//! # Resolve with prompts for anything without a value
//! plate resolve --template-folder ./templates/service
//!
//! # CI: never prompt, supply values explicitly
//! plate resolve --template-folder ./templates/service \
//!     --non-interactive --var project_name=billing --var-file ci-vars.yml --format json
//!
//! # Inspect a template's variables
//! plate list --template-folder ./templates/service
//! ```

mod list;
mod resolve;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use list::ListCommand;
pub use resolve::{OutputFormat, ResolveCommand};

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive (`"debug"`, `"info"`, ...). `None` disables logging
    /// unless `RUST_LOG` is set.
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over [`CliConfig::log_level`]. Calling this
    /// more than once is harmless.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve template variables for project scaffolding.
#[derive(Parser)]
#[command(
    name = "plate",
    about = "Resolve template variables for project scaffolding",
    version,
    long_about = "plate reads the variables a template declares in plate.yml and resolves a \
                  value for each from --var overrides, defaults, or interactive prompts."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every variable of a template and print the values
    Resolve(ResolveCommand),

    /// List the variables a template declares
    List(ListCommand),
}

impl Cli {
    /// Execute the parsed command with logging configured from the flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed flags.
    ///
    /// - `--verbose`: `debug`
    /// - `--quiet`: no logging
    /// - otherwise: `info`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Resolve(cmd) => cmd.execute().await,
            Commands::List(cmd) => cmd.execute().await,
        }
    }
}
