use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_generate_namespace_in_directory() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .generate_namespace_command()
        .args(["--name", "Settings", "--output-path", "Strings"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Created namespace Settings in Strings/Strings.swift\n"
    );
    assert_eq!(
        test.read_file("Strings/Strings.swift")?,
        "import Hexicon\n\nextension Localized.Strings {\n\n    class Settings: LocalizationNamespace {\n\n    }\n\n}\n"
    );
    Ok(())
}

#[test]
fn test_generated_namespace_is_picked_up_by_diff() -> Result<()> {
    let test = CliTest::with_file("Sources/Use.swift", "let s = Localized.Strings.Settings.title\n")?;

    let output = test
        .generate_namespace_command()
        .args(["--name", "Settings", "--output-path", "Strings/Settings.swift"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = test.diff_command().args(["--def-path", "Strings"]).output()?;
    assert_eq!(
        stdout(&output),
        "@@ Strings/Settings.swift\n@@ Localized.Strings.Settings\n++ title\n"
    );
    Ok(())
}

#[test]
fn test_generate_namespace_never_overwrites() -> Result<()> {
    let test = CliTest::with_file("Strings/Strings.swift", "// mine\n")?;

    let output = test
        .generate_namespace_command()
        .args(["--name", "Settings", "--output-path", "Strings"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(test.read_file("Strings/Strings.swift")?, "// mine\n");
    Ok(())
}

#[test]
fn test_generate_namespace_rejects_bad_names() -> Result<()> {
    let test = CliTest::new()?;

    for name in ["", "My Strings"] {
        let output = test
            .generate_namespace_command()
            .args(["--name", name])
            .output()?;
        assert_eq!(output.status.code(), Some(2), "name: {:?}", name);
    }
    assert!(!test.root().join("Strings.swift").exists());
    Ok(())
}
