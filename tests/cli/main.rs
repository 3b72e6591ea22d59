use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod diff;
mod generate_namespace;
mod generate_source;
mod output_strings;

const BIN_NAME: &str = "hexiconj";

/// A namespace declaring `stale`, as `generate-source` would write it.
pub const FOO_DEFINITION: &str = r#"import Hexicon

extension Localized.Strings {

    class Foo: LocalizationNamespace {

        static var stale: String {
            NSLocalizedString("stale", bundle: .main, comment: "")
        }

    }

}
"#;

/// Code using `Foo.title` and `Foo.greet(name:)`.
pub const FOO_USAGE: &str = r#"import UIKit

final class ViewController: UIViewController {
    func render(name: String) {
        title = Localized.Strings.Foo.title
        label.text = Localized.Strings.Foo.greet(name: name)
    }
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps config discovery inside the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn diff_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("diff");
        cmd
    }

    pub fn generate_source_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate-source");
        cmd
    }

    pub fn generate_namespace_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate-namespace");
        cmd
    }

    pub fn output_strings_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("output-strings");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("generate-source"));
    Ok(())
}
