use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::super::args::{OutputStringsArgs, OutputStringsCommand};
use super::{CommandResult, CommandSummary, OutputStringsSummary};
use crate::{
    config::Config,
    core::{
        ProjectContext,
        extraction_tool::ExtractionTool,
        resources::{
            MergeKind, ResourceTable, merge_tables,
            table::STRINGS_EXTENSION,
        },
    },
    error::HexiconError,
};

impl OutputStringsArgs {
    /// Apply CLI overrides (CLI > config file > defaults).
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref def_path) = self.def_path {
            config.definitions_path = def_path.to_string_lossy().to_string();
        }
        if let Some(ref res_path) = self.res_path {
            config.resources_path = res_path.to_string_lossy().to_string();
        }
        if let Some(ref language) = self.language {
            config.development_language = Some(language.clone());
        }
        config.strip_empty_comments |= self.strip_comments;
        config.skip_malformed_tables |= self.skip_malformed;
    }
}

pub fn output_strings(cmd: OutputStringsCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ProjectContext::new(&args.common)?;
    args.apply_to(&mut ctx.config);

    Ok(CommandResult::new(CommandSummary::OutputStrings(
        output_project_strings(&ctx)?,
    )))
}

/// Extract fresh tables from the definitions and merge them into the
/// resources, writing every merged table back.
fn output_project_strings(ctx: &ProjectContext) -> Result<OutputStringsSummary> {
    let tool = ExtractionTool::from_command(&ctx.config.extraction_tool)?;
    let sources = ctx.swift_files(&ctx.definitions_dir())?;
    let resources_dir = ctx.resources_dir();
    let existing_paths = if resources_dir.is_dir() {
        ctx.strings_files(&resources_dir)?
    } else {
        Vec::new()
    };

    let out_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    ctx.note(format!(
        "Running {} on {} source file(s)",
        tool.program(),
        sources.len()
    ));
    tool.run(&sources, out_dir.path())?;

    let mut skipped = Vec::new();
    let existing = read_tables(ctx, &existing_paths, &mut skipped)?;
    let extracted = read_tables(ctx, &extracted_table_paths(out_dir.path())?, &mut skipped)?;

    let mut tables = merge_tables(
        existing,
        &extracted,
        &resources_dir,
        ctx.config.development_language.as_deref(),
    );
    // A skipped table must not be replaced by a freshly created one.
    tables.retain(|merged| {
        merged.kind != MergeKind::Created
            || !skipped.iter().any(|(path, _)| path == merged.path())
    });

    for merged in &mut tables {
        merged.write(ctx.config.strip_empty_comments)?;
        merged.table.path = ctx.relative(&merged.table.path).to_path_buf();
    }

    Ok(OutputStringsSummary {
        tables,
        skipped: skipped
            .into_iter()
            .map(|(path, reason)| (ctx.relative(&path).to_path_buf(), reason))
            .collect(),
    })
}

/// Tables the extraction tool wrote directly into `dir`, sorted.
fn extracted_table_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == STRINGS_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read every table in parallel; malformed ones are skipped when configured
/// to, and otherwise fail the run. Results are handled in `paths` order.
fn read_tables(
    ctx: &ProjectContext,
    paths: &[PathBuf],
    skipped: &mut Vec<(PathBuf, String)>,
) -> Result<Vec<ResourceTable>> {
    let results: Vec<_> = paths.par_iter().map(|path| ResourceTable::read(path)).collect();
    let mut tables = Vec::with_capacity(paths.len());
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(table) => tables.push(table),
            Err(err @ HexiconError::MalformedResourceFile { .. })
                if ctx.config.skip_malformed_tables =>
            {
                ctx.note(format!("Skipping {}", ctx.relative(path).display()));
                skipped.push((path.clone(), err.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(tables)
}
