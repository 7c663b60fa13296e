//! Show the variables a template declares.
//!
//! ```text
//! NAME          TYPE    DEFAULT                DESCRIPTION
//! docs.title    string  {{ project_name }} docs
//! port          int     8080                   Port to listen on
//! service_name  string  -> project_name
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use crate::config::TemplateConfig;
use crate::options::expand_path;
use crate::resolver::{Catalog, build_catalog};
use crate::variables::Variable;

/// List the variables a template declares, including dependency variables.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Folder containing plate.yml
    #[arg(long, short = 't', value_name = "DIR", default_value = ".")]
    template_folder: String,
}

impl ListCommand {
    pub async fn execute(self) -> Result<()> {
        let folder = expand_path(&self.template_folder);
        let config = TemplateConfig::load_from_folder(&folder).await?;
        let catalog = build_catalog(&config);

        if catalog.is_empty() {
            println!("No variables declared in {}", folder.display());
            return Ok(());
        }

        print!("{}", format_catalog(&catalog));
        Ok(())
    }
}

/// One row per variable, columns padded to the widest entry.
fn format_catalog(catalog: &Catalog) -> String {
    let rows: Vec<[String; 4]> = catalog
        .values()
        .map(|v| {
            [
                v.name.clone(),
                v.var_type.to_string(),
                value_column(v),
                v.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let header = ["NAME", "TYPE", "DEFAULT", "DESCRIPTION"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    let header_line = format!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {}",
        header[0],
        header[1],
        header[2],
        header[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    output.push_str(&format!("{}\n", header_line.trim_end().bold()));

    for row in rows {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// `-> target` for references, the default otherwise.
fn value_column(variable: &Variable) -> String {
    if let Some(reference) = &variable.reference {
        return format!("-> {reference}");
    }
    match &variable.default {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
