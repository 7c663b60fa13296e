//! Library-level resolution passes.

use plate_cli::config::TemplateConfig;
use plate_cli::core::PlateError;
use plate_cli::options::ResolveOptions;
use plate_cli::resolver::{Collaborators, THIS_KEY, VariableValues, resolve_all_variables};
use plate_cli::templating::TeraRenderer;
use plate_cli::test_utils::{ScriptedPrompter, init_test_logging};
use plate_cli::variables::YamlTypeConverter;
use serde_json::json;

const ROOT: &str = r##"
variables:
  - name: project_name
    default: demo
  - name: docs_heading
    default: "# {{ docs.title }}"

dependencies:
  - name: docs
    template-url: docs
    output-folder: docs
    variables:
      - name: title
        default: "{{ project_name }} docs"
  - name: isolated
    template-url: isolated
    dont-inherit-variables: true
"##;

const DOCS: &str = r##"
variables:
  - name: title
  - name: project_name
    default: nested-default
"##;

fn resolve(
    options: &ResolveOptions,
    config: &TemplateConfig,
    root: &TemplateConfig,
    dependency: Option<&plate_cli::variables::Dependency>,
    prompter: &mut ScriptedPrompter,
) -> Result<VariableValues, PlateError> {
    let renderer = TeraRenderer::new();
    let mut collaborators = Collaborators::new(&renderer, &YamlTypeConverter, prompter);
    resolve_all_variables(options, config, root, dependency, &mut collaborators)
}

#[test]
fn test_root_pass() {
    init_test_logging(None);
    let root = TemplateConfig::from_yaml_str(ROOT).unwrap();
    let options = ResolveOptions::new().non_interactive(true);

    let values = resolve(&options, &root, &root, None, &mut ScriptedPrompter::empty()).unwrap();

    assert_eq!(values["docs.title"], json!("demo docs"));
    assert_eq!(values["docs_heading"], json!("# demo docs"));
    assert_eq!(values[THIS_KEY]["CurrentDep"], serde_json::Value::Null);
}

#[test]
fn test_nested_dependency_pass_uses_scoped_overrides() {
    init_test_logging(None);
    let root = TemplateConfig::from_yaml_str(ROOT).unwrap();
    let docs_config = TemplateConfig::from_yaml_str(DOCS).unwrap();
    let docs = &root.dependencies[0];

    let options = ResolveOptions::new()
        .with_var("project_name", "billing")
        .with_var("docs.title", "Billing handbook")
        .non_interactive(true);

    let nested = options.for_dependency(docs);
    let values =
        resolve(&nested, &docs_config, &root, Some(docs), &mut ScriptedPrompter::empty()).unwrap();

    assert_eq!(values["title"], json!("Billing handbook"));
    // Inherited from the parent
    assert_eq!(values["project_name"], json!("billing"));
    assert_eq!(values[THIS_KEY]["CurrentDep"]["name"], json!("docs"));
    assert_eq!(values["PlateConfigDeps"]["isolated"]["dont-inherit-variables"], json!(true));
}

#[test]
fn test_nested_pass_without_inheritance() {
    let root = TemplateConfig::from_yaml_str(ROOT).unwrap();
    let isolated_config = TemplateConfig::from_yaml_str(DOCS).unwrap();
    let isolated = &root.dependencies[1];

    let options = ResolveOptions::new()
        .with_var("project_name", "billing")
        .with_var("isolated.title", "Only this")
        .non_interactive(true);

    let nested = options.for_dependency(isolated);
    let values = resolve(
        &nested,
        &isolated_config,
        &root,
        Some(isolated),
        &mut ScriptedPrompter::empty(),
    )
    .unwrap();

    assert_eq!(values["title"], json!("Only this"));
    assert_eq!(values["project_name"], json!("nested-default"));
}

#[test]
fn test_interactive_pass_prompts_only_for_missing_values() {
    let config = TemplateConfig::from_yaml_str(DOCS).unwrap();
    let options = ResolveOptions::new().with_var("project_name", "given");
    let mut prompter = ScriptedPrompter::new(["Handbook"]);

    let values = resolve(&options, &config, &config, None, &mut prompter).unwrap();

    assert_eq!(values["title"], json!("Handbook"));
    assert_eq!(values["project_name"], json!("given"));
    assert_eq!(prompter.shown().to_vec(), vec!["title"]);
}
