//! Tests for the `content` filter in variable values.

use predicates::prelude::*;
use serde_json::json;

use super::common::TemplateDir;

#[test]
fn test_content_filter_embeds_file() {
    let template = TemplateDir::new(
        r#"
variables:
  - name: owner
    default: ACME
  - name: header
    default: "{{ 'snippets/header.txt' | content }}"
"#,
    );
    template.write("snippets/header.txt", "Copyright {{ owner }}");

    let output = template
        .command("resolve")
        .args(["--non-interactive", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let values: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(values["header"], json!("Copyright ACME"));
}

#[test]
fn test_content_filter_rejects_traversal() {
    let template = TemplateDir::new(
        r#"
variables:
  - name: secret
    default: "{{ '../outside.txt' | content }}"
"#,
    );

    template
        .command("resolve")
        .arg("--non-interactive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes the template folder"));
}
