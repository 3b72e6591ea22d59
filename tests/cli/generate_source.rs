use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, FOO_DEFINITION, FOO_USAGE, stderr, stdout};

const FOO_DIFF: &str = "@@ Strings/Foo.swift
@@ Localized.Strings.Foo
++ title
++ greet(name:)
-- stale";

#[test]
fn test_generate_source_applies_diff() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;

    let output = test
        .generate_source_command()
        .args(["--diff", FOO_DIFF])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Updated 1 namespace:"));
    insta::assert_snapshot!(test.read_file("Strings/Foo.swift")?, @r#"
    import Hexicon

    extension Localized.Strings {

        class Foo: LocalizationNamespace {

            static var title: String {
                NSLocalizedString("title", bundle: .main, comment: "")
            }

            static func greet(name: Any) -> String {
                NSLocalizedString("greet", bundle: .main, comment: "")
            }

        }

    }
    "#);
    Ok(())
}

#[test]
fn test_generate_source_from_diff_file_with_options() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("changes.diff", &format!("{}\n", FOO_DIFF))?;

    let output = test
        .generate_source_command()
        .args(["--diff-file", "changes.diff", "--custom-bundle", "--table-name"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let source = test.read_file("Strings/Foo.swift")?;
    assert!(source.contains(
        r#"NSLocalizedString("title", tableName: "Foo", bundle: bundle, comment: "")"#
    ));
    assert!(!source.contains("stale"));
    Ok(())
}

#[test]
fn test_generate_source_empty_diff_is_noop() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;

    let output = test.generate_source_command().args(["--diff", ""]).output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to generate"));
    assert_eq!(test.read_file("Strings/Foo.swift")?, FOO_DEFINITION);
    Ok(())
}

#[test]
fn test_generate_source_undecodable_diff_warns() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;

    let output = test
        .generate_source_command()
        .args(["--diff", "not a diff"])
        .output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: Could not decode the diff"));
    assert_eq!(test.read_file("Strings/Foo.swift")?, FOO_DEFINITION);
    Ok(())
}

#[test]
fn test_generate_source_requires_a_diff() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_source_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No diff given"));
    Ok(())
}

#[test]
fn test_run_brings_namespaces_up_to_date() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("Sources/ViewController.swift", FOO_USAGE)?;

    let output = test
        .command()
        .args(["run", "--def-path", "Strings"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Strings/Foo.swift"));

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    Ok(())
}
