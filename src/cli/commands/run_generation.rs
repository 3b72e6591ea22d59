use anyhow::Result;

use super::super::args::RunCommand;
use super::{CommandResult, CommandSummary, diff::project_diff, generate_source::apply_diff};
use crate::core::ProjectContext;

/// `diff` followed by `generate-source` with the computed diff.
pub fn run_generation(cmd: RunCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ProjectContext::new(&args.common)?;
    args.paths.apply_to(&mut ctx.config);
    args.lookup.apply_to(&mut ctx.config);

    let diff_summary = project_diff(&ctx)?;
    let source_summary = apply_diff(&ctx, &diff_summary.diff)?;

    Ok(CommandResult::new(CommandSummary::Run(
        diff_summary,
        source_summary,
    )))
}
