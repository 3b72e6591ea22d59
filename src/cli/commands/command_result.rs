use std::path::PathBuf;

use crate::core::{collect::DuplicateNamespace, diff::Diff, resources::MergedTable};

#[derive(Debug)]
pub enum CommandSummary {
    Diff(DiffSummary),
    GenerateNamespace(GenerateNamespaceSummary),
    GenerateSource(GenerateSourceSummary),
    OutputStrings(OutputStringsSummary),
    Run(DiffSummary, GenerateSourceSummary),
}

#[derive(Debug)]
pub struct DiffSummary {
    pub diff: Diff,
    /// Encoded diff, printed verbatim so it can be piped into `generate-source`.
    pub encoded: String,
    pub definition_files: usize,
    pub scanned_files: usize,
    pub duplicates: Vec<DuplicateNamespace>,
}

#[derive(Debug, Default)]
pub struct GenerateSourceSummary {
    pub rewritten: Vec<PathBuf>,
    /// Changesets whose origin file no longer declares the namespace.
    pub missing: Vec<(PathBuf, String)>,
    /// Set when the diff text could not be decoded.
    pub decode_error: Option<String>,
}

#[derive(Debug)]
pub struct GenerateNamespaceSummary {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct OutputStringsSummary {
    pub tables: Vec<MergedTable>,
    /// Malformed tables that were skipped: (path, reason).
    pub skipped: Vec<(PathBuf, String)>,
}

/// Result of running hexicon commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self { summary }
    }
}
