//! Resolve a template's variables and print the values.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::TemplateConfig;
use crate::options::{ResolveOptions, expand_path};
use crate::prompt::TerminalPrompter;
use crate::resolver::{Collaborators, VariableValues, build_catalog, resolve_all_variables};
use crate::templating::TeraRenderer;
use crate::variables::YamlTypeConverter;

/// Output format for resolved values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Resolve every variable of a template.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Folder containing plate.yml
    #[arg(long, short = 't', value_name = "DIR", default_value = ".")]
    template_folder: String,

    /// Set a variable, NAME=VALUE. VALUE is parsed as YAML. May be repeated
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// YAML file of NAME: VALUE pairs. May be repeated; later files win and --var wins over all
    #[arg(long = "var-file", value_name = "FILE")]
    var_files: Vec<String>,

    /// Never prompt. Variables without a value or default are an error
    #[arg(long)]
    non_interactive: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
}

impl ResolveCommand {
    pub async fn execute(self) -> Result<()> {
        let folder = expand_path(&self.template_folder);
        let config = TemplateConfig::load_from_folder(&folder).await?;
        let options = self.build_options(folder).await?;

        // Prompting reads stdin synchronously
        let values = tokio::task::spawn_blocking(move || resolve_template(&options, &config))
            .await
            .context("Variable resolution task failed")??;

        print!("{}", format_values(&values, self.format)?);
        Ok(())
    }

    /// Overrides from var files first, then `--var`.
    async fn build_options(&self, template_folder: PathBuf) -> Result<ResolveOptions> {
        let mut options = ResolveOptions::new()
            .non_interactive(self.non_interactive)
            .with_template_folder(template_folder);

        for file in &self.var_files {
            options.apply_var_file(&expand_path(file)).await?;
        }
        options.apply_var_args(&self.vars)?;

        Ok(options)
    }
}

/// Resolve `config` as the root template, keeping only its variables.
fn resolve_template(options: &ResolveOptions, config: &TemplateConfig) -> Result<VariableValues> {
    let renderer = TeraRenderer::new();
    let mut prompter = TerminalPrompter::stdio();
    let mut collaborators = Collaborators::new(&renderer, &YamlTypeConverter, &mut prompter);

    let mut values = resolve_all_variables(options, config, config, None, &mut collaborators)?;

    let catalog = build_catalog(config);
    values.retain(|name, _| catalog.contains_key(name));
    Ok(values)
}

/// Serialize resolved values for stdout.
pub fn format_values(values: &VariableValues, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            if values.is_empty() {
                return Ok(String::new());
            }
            serde_yaml::to_string(values).context("Failed to serialize values as YAML")
        }
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(values).context("Failed to serialize values as JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}
