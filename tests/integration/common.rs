//! Shared helpers for integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use plate_cli::test_utils::ConfigFixture;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A template folder holding a `plate.yml`.
pub struct TemplateDir {
    pub temp: TempDir,
}

impl TemplateDir {
    pub fn new(config: &str) -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("plate.yml"), config).unwrap();
        Self {
            temp,
        }
    }

    pub fn from_fixture(fixture: &ConfigFixture) -> Self {
        let temp = TempDir::new().unwrap();
        fixture.write_to(temp.path()).unwrap();
        Self {
            temp,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write an extra file relative to the template folder.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// `plate <subcommand> --template-folder <dir>` with logging silenced.
    pub fn command(&self, subcommand: &str) -> Command {
        let mut cmd = plate();
        cmd.arg(subcommand).arg("--template-folder").arg(self.path()).arg("--quiet");
        cmd
    }
}

/// The `plate` binary with `RUST_LOG` cleared.
pub fn plate() -> Command {
    let mut cmd = Command::cargo_bin("plate").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}
