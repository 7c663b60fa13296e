//! Variable catalog construction.

use std::collections::BTreeMap;

use crate::config::TemplateConfig;
use crate::variables::Variable;

/// Every variable visible to a resolution pass, keyed by (namespaced) name.
pub type Catalog = BTreeMap<String, Variable>;

/// Collect the local variables of `config` plus the namespaced variables of
/// each of its dependencies.
///
/// Local variables are inserted first, then dependencies in declaration
/// order. A later entry with the same name replaces an earlier one.
pub fn build_catalog(config: &TemplateConfig) -> Catalog {
    let mut catalog = Catalog::new();

    for variable in &config.variables {
        insert(&mut catalog, variable.clone());
    }

    for dependency in &config.dependencies {
        for variable in dependency.namespaced_variables() {
            insert(&mut catalog, variable);
        }
    }

    catalog
}

fn insert(catalog: &mut Catalog, variable: Variable) {
    if let Some(previous) = catalog.insert(variable.name.clone(), variable) {
        tracing::debug!("Variable '{}' declared more than once; using the last declaration", previous.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::Dependency;
    use serde_json::json;

    #[test]
    fn test_local_and_namespaced_variables() {
        let config = TemplateConfig::new(
            vec![Variable::new("project_name"), Variable::new("port")],
            vec![
                Dependency::new("docs").with_variable(Variable::new("title")),
                Dependency::new("api").with_variable(Variable::new("port")),
            ],
        );

        let catalog = build_catalog(&config);
        let names: Vec<_> = catalog.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["api.port", "docs.title", "port", "project_name"]);
        assert_eq!(catalog["docs.title"].full_name(), "docs.title");
    }

    #[test]
    fn test_last_writer_wins() {
        let config = TemplateConfig::new(
            vec![Variable::new("x").with_default("local")],
            vec![
                Dependency::new("d").with_variable(Variable::new("y").with_default("first")),
                Dependency::new("d").with_variable(Variable::new("y").with_default("second")),
            ],
        );

        let catalog = build_catalog(&config);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["d.y"].default, Some(json!("second")));
    }

    #[test]
    fn test_empty_config() {
        assert!(build_catalog(&TemplateConfig::default()).is_empty());
    }
}
