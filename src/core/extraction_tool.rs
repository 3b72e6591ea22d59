//! The external string-extraction tool, run as a blocking subprocess.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::HexiconError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTool {
    program: String,
    args: Vec<String>,
}

impl ExtractionTool {
    /// Build from a command line such as `["xcrun", "extractLocStrings"]`.
    pub fn from_command(command: &[String]) -> Result<Self, HexiconError> {
        match command {
            [program, args @ ..] if !program.is_empty() => Ok(Self {
                program: program.clone(),
                args: args.to_vec(),
            }),
            _ => Err(HexiconError::invalid_arguments(
                "No extraction tool configured",
            )),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run `<program> <args> -o <out_dir> <sources>` and wait for it.
    ///
    /// A tool that cannot be started or exits unsuccessfully is reported as
    /// invalid arguments, with whatever the tool wrote to stderr.
    pub fn run(&self, sources: &[PathBuf], out_dir: &Path) -> Result<(), HexiconError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("-o")
            .arg(out_dir)
            .args(sources)
            .output()
            .map_err(|err| {
                HexiconError::invalid_arguments(format!(
                    "Failed to run extraction tool '{}': {}",
                    self.program, err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(HexiconError::invalid_arguments(if detail.is_empty() {
                format!("Extraction tool '{}' failed ({})", self.program, output.status)
            } else {
                format!(
                    "Extraction tool '{}' failed ({}): {}",
                    self.program, output.status, detail
                )
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_command() {
        let tool = ExtractionTool::from_command(&command(&["xcrun", "extractLocStrings"])).unwrap();
        assert_eq!(tool.program(), "xcrun");
        assert_eq!(tool.args, vec!["extractLocStrings"]);

        assert!(ExtractionTool::from_command(&[]).is_err());
        assert!(ExtractionTool::from_command(&command(&[""])).is_err());
    }

    #[test]
    fn test_missing_program() {
        let tool =
            ExtractionTool::from_command(&command(&["hexicon-test-no-such-program"])).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = tool.run(&[], dir.path()).unwrap_err();

        assert!(matches!(err, HexiconError::InvalidArguments(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_output_dir_and_sources() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.txt");
        let script = format!("echo \"$@\" > '{}'", log.display());
        let tool = ExtractionTool::from_command(&command(&["sh", "-c", &script, "tool"])).unwrap();

        tool.run(&[PathBuf::from("A.swift"), PathBuf::from("B.swift")], Path::new("out"))
            .unwrap();

        let args = std::fs::read_to_string(&log).unwrap();
        assert_eq!(args.trim(), "-o out A.swift B.swift");
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_carries_stderr() {
        let tool =
            ExtractionTool::from_command(&command(&["sh", "-c", "echo boom >&2; exit 3", "tool"]))
                .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = tool.run(&[], dir.path()).unwrap_err();

        assert!(err.to_string().contains("boom"));
    }
}
