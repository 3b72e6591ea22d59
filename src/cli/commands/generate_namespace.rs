use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::GenerateNamespaceCommand;
use super::{CommandResult, CommandSummary, GenerateNamespaceSummary};
use crate::{
    core::{
        ProjectContext,
        file_scanner::SWIFT_EXTENSION,
        synthesis::builders::{is_identifier, namespace_file},
    },
    error::HexiconError,
};

/// File name used when the output path names a directory.
pub const NAMESPACE_FILE_NAME: &str = "Strings.swift";

pub fn generate_namespace(cmd: GenerateNamespaceCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let name = args.name.trim();
    if name.is_empty() {
        return Err(HexiconError::invalid_arguments("Namespace name must not be empty").into());
    }
    if !is_identifier(name) {
        return Err(HexiconError::invalid_arguments(format!(
            "'{}' is not a valid type name",
            name
        ))
        .into());
    }

    let path = namespace_path(&ctx, args.output_path.as_deref());
    if path.exists() {
        return Err(
            HexiconError::invalid_arguments(format!("{} already exists", path.display())).into(),
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, namespace_file(name))
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(CommandResult::new(CommandSummary::GenerateNamespace(
        GenerateNamespaceSummary {
            path: ctx.relative(&path).to_path_buf(),
            name: name.to_string(),
        },
    )))
}

/// The output path, or the definitions directory when none is given; a path
/// that is not a Swift file gets the default file name appended.
fn namespace_path(ctx: &ProjectContext, output_path: Option<&Path>) -> PathBuf {
    let base = match output_path {
        Some(path) => ctx.resolve(path),
        None => ctx.definitions_dir(),
    };
    if base.extension().is_some_and(|ext| ext == SWIFT_EXTENSION) {
        base
    } else {
        base.join(NAMESPACE_FILE_NAME)
    }
}
