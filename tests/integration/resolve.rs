//! Tests for `plate resolve`.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TemplateDir;
use plate_cli::test_utils::ConfigFixture;

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_resolve_defaults_non_interactive() {
    let template = TemplateDir::from_fixture(&ConfigFixture::basic());

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .success()
        .stdout(predicate::str::contains("project_name: demo"))
        .stdout(predicate::str::contains("port: 8080"))
        .stdout(predicate::str::contains("service_name: demo"))
        .stdout(predicate::str::contains("PlateConfigVars").not());
}

#[test]
fn test_resolve_var_overrides_default() {
    let template = TemplateDir::from_fixture(&ConfigFixture::basic());

    let output = template
        .command("resolve")
        .args(["--non-interactive", "--var", "project_name=billing", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let values = stdout_json(&output);
    assert_eq!(values["project_name"], json!("billing"));
    // The reference follows the override
    assert_eq!(values["service_name"], json!("billing"));
}

#[test]
fn test_resolve_templates_and_dependencies() {
    let template = TemplateDir::from_fixture(&ConfigFixture::with_dependency());

    let output = template
        .command("resolve")
        .args(["--non-interactive", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let values = stdout_json(&output);
    assert_eq!(values["port"], json!(8080));
    assert_eq!(values["docs.title"], json!("DEMO docs"));
    assert_eq!(values["summary"], json!("DEMO docs on port 8080"));
}

#[test]
fn test_resolve_var_file_and_precedence() {
    let template = TemplateDir::from_fixture(&ConfigFixture::missing_default());
    template.write("vars/base.yml", "project_name: from-base\n");
    template.write("vars/override.yml", "project_name: from-override\n");

    let output = template
        .command("resolve")
        .arg("--non-interactive")
        .arg("--var-file")
        .arg(template.path().join("vars/base.yml"))
        .arg("--var-file")
        .arg(template.path().join("vars/override.yml"))
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["project_name"], json!("from-override"));

    let output = template
        .command("resolve")
        .arg("--non-interactive")
        .arg("--var-file")
        .arg(template.path().join("vars/base.yml"))
        .args(["--var", "project_name=from-arg", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["project_name"], json!("from-arg"));
}

#[test]
fn test_resolve_missing_value_non_interactive() {
    let template = TemplateDir::from_fixture(&ConfigFixture::missing_default());

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'project_name'"))
        .stderr(predicate::str::contains("--var project_name=VALUE"));
}

#[test]
fn test_resolve_cyclic_reference() {
    let template = TemplateDir::from_fixture(&ConfigFixture::cyclic());

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic reference"));
}

#[test]
fn test_resolve_prompts_on_stdin() {
    let template = TemplateDir::new(
        r#"
variables:
  - name: project_name
    description: Name of the project
  - name: port
    type: int
    default: 8080
"#,
    );

    // Catalog order is port, project_name; an empty answer takes the default
    template
        .command("resolve")
        .write_stdin("\nbilling\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 8080"))
        .stdout(predicate::str::contains("project_name: billing"))
        .stderr(predicate::str::contains("Name of the project"))
        .stderr(predicate::str::contains("Enter a value"));
}

#[test]
fn test_resolve_closed_stdin_fails() {
    let template = TemplateDir::from_fixture(&ConfigFixture::missing_default());

    template
        .command("resolve")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input"));
}

#[test]
fn test_resolve_invalid_var_argument() {
    let template = TemplateDir::from_fixture(&ConfigFixture::basic());

    template
        .command("resolve")
        .args(["--var", "project_name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_resolve_invalid_type() {
    let template = TemplateDir::from_fixture(&ConfigFixture::basic());

    template
        .command("resolve")
        .args(["--non-interactive", "--var", "port=eighty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid int"));
}

#[test]
fn test_resolve_missing_config() {
    let temp = tempfile::TempDir::new().unwrap();

    super::common::plate()
        .arg("resolve")
        .arg("--template-folder")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template config not found"));
}

#[test]
fn test_resolve_invalid_config() {
    let template = TemplateDir::from_fixture(&ConfigFixture::invalid_syntax());

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template config"));
}

#[test]
fn test_resolve_unknown_template_variable() {
    let template = TemplateDir::new(
        r#"
variables:
  - name: project_name
    default: demo
  - name: image
    default: "{{ project_nme }}:latest"
"#,
    );

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_nme"))
        .stderr(predicate::str::contains("project_name"));
}
