use anyhow::Result;

use super::super::args::{DiffCommand, DiffPaths};
use super::{CommandResult, CommandSummary, DiffSummary};
use crate::{
    config::Config,
    core::{
        ProjectContext,
        collect::{collect_definitions, collect_usages},
        diff::{compute_diff, encode},
        source::SourceFile,
    },
};

impl DiffPaths {
    /// Apply CLI overrides (CLI > config file > defaults).
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref def_path) = self.def_path {
            config.definitions_path = def_path.to_string_lossy().to_string();
        }
        if let Some(ref scan_path) = self.scan_path {
            config.scan_path = Some(scan_path.to_string_lossy().to_string());
        }
    }
}

pub fn diff(cmd: DiffCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ProjectContext::new(&args.common)?;
    args.paths.apply_to(&mut ctx.config);

    Ok(CommandResult::new(CommandSummary::Diff(project_diff(&ctx)?)))
}

/// Extract definitions and usages and compare them.
///
/// Changeset origins are made relative to the project root, so the printed
/// diff stays valid for any later run against the same project.
pub(super) fn project_diff(ctx: &ProjectContext) -> Result<DiffSummary> {
    let definition_paths = ctx.swift_files(&ctx.definitions_dir())?;
    let definition_files = SourceFile::read_all(&definition_paths)?;
    let definitions = collect_definitions(&definition_files);
    ctx.note(format!(
        "Found {} namespace(s) in {} definition file(s)",
        definitions.len(),
        definition_files.len()
    ));

    let scanned_paths = ctx.swift_files(&ctx.scan_dir())?;
    let scanned_files = SourceFile::read_all(&scanned_paths)?;
    let candidates = collect_usages(&scanned_files, &definitions.known_names());

    let mut diff = compute_diff(&definitions, &candidates);
    for changeset in &mut diff.changes {
        changeset.origin = ctx.relative(&changeset.origin).to_path_buf();
    }
    let encoded = encode(&diff);

    Ok(DiffSummary {
        diff,
        encoded,
        definition_files: definition_files.len(),
        scanned_files: scanned_files.len(),
        duplicates: definitions.duplicates,
    })
}
