use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};

use super::super::args::{GenerateSourceCommand, LookupArgs};
use super::{CommandResult, CommandSummary, GenerateSourceSummary};
use crate::{
    config::Config,
    core::{
        ProjectContext,
        diff::{Diff, decode},
        synthesis::{SynthesisOutcome, apply_changeset},
    },
    error::HexiconError,
};

/// Reads the diff from stdin when passed as `--diff-file`.
const STDIN_PATH: &str = "-";

impl LookupArgs {
    /// Switches only ever turn an option on; the config file may already have.
    pub fn apply_to(&self, config: &mut Config) {
        config.use_custom_bundle |= self.custom_bundle;
        config.use_table_name |= self.table_name;
    }
}

pub fn generate_source(cmd: GenerateSourceCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ProjectContext::new(&args.common)?;
    args.lookup.apply_to(&mut ctx.config);

    let text = match (&args.diff, &args.diff_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == STDIN_PATH => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read diff from stdin")?;
            text
        }
        (None, Some(path)) => read_diff_file(&ctx.resolve(path))?,
        (None, None) => {
            return Err(HexiconError::invalid_arguments(
                "No diff given; pass --diff or --diff-file",
            )
            .into());
        }
    };

    Ok(CommandResult::new(CommandSummary::GenerateSource(
        apply_diff_text(&ctx, &text)?,
    )))
}

fn read_diff_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read diff file: {}", path.display()))
}

/// Decode `text` and apply it. Blank text is nothing to do, and text that
/// does not decode is reported without touching any file.
pub(super) fn apply_diff_text(ctx: &ProjectContext, text: &str) -> Result<GenerateSourceSummary> {
    if text.trim().is_empty() {
        ctx.note("Empty diff, nothing to generate");
        return Ok(GenerateSourceSummary::default());
    }
    match decode(text) {
        Ok(diff) => apply_diff(ctx, &diff),
        Err(err) => Ok(GenerateSourceSummary {
            decode_error: Some(HexiconError::from(err).to_string()),
            ..GenerateSourceSummary::default()
        }),
    }
}

/// Rewrite the origin file of every changeset, in order.
pub(super) fn apply_diff(ctx: &ProjectContext, diff: &Diff) -> Result<GenerateSourceSummary> {
    let options = ctx.synthesis_options();
    let mut summary = GenerateSourceSummary::default();

    for changeset in &diff.changes {
        let origin = ctx.resolve(&changeset.origin);
        match apply_changeset(changeset, &origin, options)? {
            SynthesisOutcome::Rewritten => {
                ctx.note(format!(
                    "Rewrote {} in {}",
                    changeset.namespace,
                    changeset.origin.display()
                ));
                summary.rewritten.push(changeset.origin.clone());
            }
            SynthesisOutcome::NamespaceNotFound => summary
                .missing
                .push((changeset.origin.clone(), changeset.namespace.clone())),
        }
    }
    Ok(summary)
}
