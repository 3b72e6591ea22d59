#![cfg(unix)]

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, FOO_DEFINITION, stderr, stdout};

/// Stands in for the extraction tool: writes a `Foo` table into the `-o`
/// directory it is given as its second argument.
const FAKE_EXTRACTOR: &str = r#"printf '/* Greeting */\n"greeting" = "greeting";\n\n"farewell" = "farewell";\n' > "$2/Foo.strings""#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    let config = json!({
        "definitionsPath": "Strings",
        "resourcesPath": "Resources",
        "developmentLanguage": "en",
        "extractionTool": ["/bin/sh", "-c", FAKE_EXTRACTOR, "extract"],
    });
    test.write_file(".hexiconrc.json", &serde_json::to_string_pretty(&config)?)?;
    Ok(test)
}

#[test]
fn test_output_strings_creates_missing_table() -> Result<()> {
    let test = project()?;

    let output = test.output_strings_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Created Resources/en.lproj/Foo.strings (2 added)\n\u{2713} Wrote 1 table\n"
    );
    insta::assert_snapshot!(test.read_file("Resources/en.lproj/Foo.strings")?, @r#"
    /* No comment provided by engineer. */
    "farewell" = "farewell";

    /* Greeting */
    "greeting" = "greeting";
    "#);
    Ok(())
}

#[test]
fn test_output_strings_merges_existing_table() -> Result<()> {
    let test = project()?;
    test.write_file(
        "Resources/en.lproj/Foo.strings",
        "\"greeting\" = \"Hello there\";\n\"stale\" = \"Unused\";\n",
    )?;
    test.write_file("Resources/de.lproj/Foo.strings", "\"greeting\" = \"Hallo\";\n")?;

    let output = test
        .output_strings_command()
        .arg("--strip-comments")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Updated Resources/en.lproj/Foo.strings (1 added, 1 removed, 1 comment(s) refreshed)\n\u{2713} Wrote 1 table\n"
    );
    assert_eq!(
        test.read_file("Resources/en.lproj/Foo.strings")?,
        "\"farewell\" = \"farewell\";\n\n/* Greeting */\n\"greeting\" = \"Hello there\";\n\n"
    );
    // Other languages are left alone.
    assert_eq!(
        test.read_file("Resources/de.lproj/Foo.strings")?,
        "\"greeting\" = \"Hallo\";\n"
    );
    Ok(())
}

#[test]
fn test_output_strings_is_idempotent() -> Result<()> {
    let test = project()?;

    let first = test.output_strings_command().output()?;
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    let written = test.read_file("Resources/en.lproj/Foo.strings")?;

    let second = test.output_strings_command().output()?;
    assert!(second.status.success());
    assert!(stdout(&second).starts_with("Unchanged Resources/en.lproj/Foo.strings\n"));
    assert_eq!(test.read_file("Resources/en.lproj/Foo.strings")?, written);
    Ok(())
}

#[test]
fn test_output_strings_malformed_table() -> Result<()> {
    let test = project()?;
    test.write_file("Resources/en.lproj/Foo.strings", "\"greeting\" = oops;\n")?;

    let output = test.output_strings_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("malformed resource file"));

    let output = test
        .output_strings_command()
        .arg("--skip-malformed")
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Skipped malformed table Resources/en.lproj/Foo.strings"));
    assert_eq!(
        test.read_file("Resources/en.lproj/Foo.strings")?,
        "\"greeting\" = oops;\n"
    );
    Ok(())
}

#[test]
fn test_output_strings_reads_many_tables_in_order() -> Result<()> {
    let test = project()?;
    test.write_file("Resources/en.lproj/Foo.strings", "\"greeting\" = \"Hi\";\n")?;
    test.write_file("Resources/en.lproj/Bar.strings", "\"a\" = ;\n")?;
    test.write_file("Resources/en.lproj/Baz.strings", "\"b\" = \"B\"\n")?;
    test.write_file("Resources/en.lproj/Qux.strings", "\"q\" = \"Q\";\n")?;

    let output = test
        .output_strings_command()
        .arg("--skip-malformed")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stderr = stderr(&output);
    let bar = stderr.find("Skipped malformed table Resources/en.lproj/Bar.strings");
    let baz = stderr.find("Skipped malformed table Resources/en.lproj/Baz.strings");
    assert!(bar.is_some() && baz.is_some() && bar < baz, "stderr: {}", stderr);
    assert!(stdout(&output).contains("Updated Resources/en.lproj/Foo.strings"));
    assert_eq!(test.read_file("Resources/en.lproj/Qux.strings")?, "\"q\" = \"Q\";\n");
    Ok(())
}

#[test]
fn test_output_strings_failing_extractor() -> Result<()> {
    let test = CliTest::with_file("Strings/Foo.swift", FOO_DEFINITION)?;
    let config = json!({
        "definitionsPath": "Strings",
        "extractionTool": ["/bin/sh", "-c", "echo 'no sdk' >&2; exit 1", "extract"],
    });
    test.write_file(".hexiconrc.json", &config.to_string())?;

    let output = test.output_strings_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no sdk"));
    Ok(())
}
