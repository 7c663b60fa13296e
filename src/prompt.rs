//! Interactive prompting for variables without a value.

use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::core::{PlateError, Result};
use crate::variables::Variable;

/// Label shown when asking for a value.
pub const ENTER_VALUE_LABEL: &str = "Enter a value";

/// Asks the user for variable values.
pub trait Prompter {
    /// Describe `variable` before asking for its value.
    fn show_variable(&mut self, variable: &Variable) -> Result<()>;

    /// Ask for a value and return the raw text the user entered, without the
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::PromptFailed`] when input cannot be read, including
    /// when the input stream is closed.
    fn prompt(&mut self, label: &str) -> Result<String>;
}

/// [`Prompter`] reading lines from `input` and writing to `output`.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter reading stdin. Prompts go to stderr so stdout only carries results.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
        }
    }

    /// Consume the prompter, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn show_variable(&mut self, variable: &Variable) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", variable.full_name().bright_green().bold())?;
        if let Some(description) = &variable.description {
            writeln!(self.output, "  {description}")?;
        }
        writeln!(self.output, "  {}", details_line(variable).dimmed())?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "  {}: ", label.cyan())?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|e| PlateError::PromptFailed {
            reason: e.to_string(),
        })?;
        if read == 0 {
            return Err(PlateError::PromptFailed {
                reason: "input stream closed".to_string(),
            });
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// `(type: int, example value: 8080, default: 80)`
fn details_line(variable: &Variable) -> String {
    let mut parts = vec![format!("type: {}", variable.var_type)];
    if let Some(example) = &variable.example {
        parts.push(format!("example value: {example}"));
    }
    if let Some(default) = &variable.default {
        let default = match default {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        parts.push(format!("default: {default}"));
    }
    if !variable.options.is_empty() {
        parts.push(format!("options: {}", variable.options.join(", ")));
    }
    format!("({})", parts.join(", "))
}
