use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, FOO_DEFINITION, FOO_USAGE, stderr, stdout};

#[test]
fn test_diff_prints_changesets() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("Sources/ViewController.swift", FOO_USAGE)?;

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "@@ Strings/Foo.swift\n@@ Localized.Strings.Foo\n++ title\n++ greet(name:)\n-- stale\n"
    );
    assert!(stderr(&output).contains("1 namespace to update"));
    Ok(())
}

#[test]
fn test_diff_reports_unresolved_references() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file(
        "Sources/Other.swift",
        "let a = Localized.Strings.Foo.stale\nlet b = Localized.Strings.Bar.title\n",
    )?;

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "== Skipped ==\n** Localized.Strings.Bar.title\n"
    );
    Ok(())
}

#[test]
fn test_diff_up_to_date() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("Sources/Use.swift", "let s = Localized.Strings.Foo.stale\n")?;

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Namespaces are up to date"));
    Ok(())
}

#[test]
fn test_diff_uses_config_paths() -> Result<()> {
    let test = CliTest::with_file("App/Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("App/Sources/ViewController.swift", FOO_USAGE)?;
    test.write_file(
        ".hexiconrc.json",
        r#"{ "definitionsPath": "App/Strings", "scanPath": "App/Sources" }"#,
    )?;

    let output = test.diff_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("@@ App/Strings/Foo.swift\n"));
    Ok(())
}

#[test]
fn test_diff_missing_definitions_directory() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.diff_command().args(["--def-path", "Nope"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Directory not found"));
    Ok(())
}

#[test]
fn test_diff_fails_on_unparsable_source() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    test.write_file("Sources/Broken.swift", "let a = 1\nlet b = )\n")?;

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Broken.swift:2: "));
    Ok(())
}
