//! Tests for `plate list`.

use predicates::prelude::*;

use super::common::TemplateDir;
use plate_cli::test_utils::ConfigFixture;

#[test]
fn test_list_shows_catalog() {
    let template = TemplateDir::from_fixture(&ConfigFixture::with_dependency());

    template
        .command("list")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("docs.title"))
        .stdout(predicate::str::contains("{{ project_name | upper }} docs"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_list_shows_references() {
    let template = TemplateDir::from_fixture(&ConfigFixture::basic());

    template
        .command("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("-> project_name"))
        .stdout(predicate::str::contains("Name of the generated project"));
}

#[test]
fn test_list_empty_config() {
    let template = TemplateDir::new("");

    template
        .command("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No variables declared"));
}

#[test]
fn test_list_rejects_invalid_config() {
    let template = TemplateDir::new("variables:\n  - name: color\n    type: enum\n");

    template
        .command("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must declare options"));
}
