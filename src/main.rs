//! plate CLI entry point
//!
//! Parses arguments, runs the command and displays errors with suggestions.
//!
//! - `resolve` - Resolve a template's variables
//! - `list` - List the variables a template declares

use anyhow::Result;
use clap::Parser;
use plate_cli::cli;
use plate_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
