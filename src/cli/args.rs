//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `diff`: Compare declared namespaces with their uses and print the diff
//! - `generate-namespace`: Create a new, empty string namespace file
//! - `generate-source`: Apply a diff to the namespace declarations
//! - `output-strings`: Extract `.strings` tables and merge them into the resources
//! - `run`: `diff` followed by `generate-source`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Diff(cmd)) => cmd.args.common.verbose,
            Some(Command::GenerateNamespace(cmd)) => cmd.args.common.verbose,
            Some(Command::GenerateSource(cmd)) => cmd.args.common.verbose,
            Some(Command::OutputStrings(cmd)) => cmd.args.common.verbose,
            Some(Command::Run(cmd)) => cmd.args.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(long, env = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where namespaces are declared and where they are used.
#[derive(Debug, Clone, Default, Args)]
pub struct DiffPaths {
    /// Path to the files declaring the string namespaces (overrides config file)
    #[arg(long)]
    pub def_path: Option<PathBuf>,

    /// Path to the files using the string namespaces (overrides config file)
    #[arg(long)]
    pub scan_path: Option<PathBuf>,
}

/// How synthesized accessors look up their strings.
#[derive(Debug, Clone, Default, Args)]
pub struct LookupArgs {
    /// Look strings up in `bundle` instead of the main bundle
    #[arg(long)]
    pub custom_bundle: bool,

    /// Pass the namespace's table name to each lookup
    #[arg(long)]
    pub table_name: bool,
}

#[derive(Debug, Parser)]
pub struct DiffArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub paths: DiffPaths,
}

#[derive(Debug, Args)]
pub struct DiffCommand {
    #[command(flatten)]
    pub args: DiffArgs,
}

#[derive(Debug, Parser)]
pub struct GenerateNamespaceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Name of the namespace type
    #[arg(long)]
    pub name: String,

    /// File or directory to create the namespace in
    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateNamespaceCommand {
    #[command(flatten)]
    pub args: GenerateNamespaceArgs,
}

#[derive(Debug, Parser)]
pub struct GenerateSourceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Diff text, as printed by `diff`
    #[arg(long, conflicts_with = "diff_file")]
    pub diff: Option<String>,

    /// File holding the diff text
    #[arg(long)]
    pub diff_file: Option<PathBuf>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Debug, Args)]
pub struct GenerateSourceCommand {
    #[command(flatten)]
    pub args: GenerateSourceArgs,
}

#[derive(Debug, Parser)]
pub struct OutputStringsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the files declaring the string namespaces (overrides config file)
    #[arg(long)]
    pub def_path: Option<PathBuf>,

    /// Path to the `.strings` tables (overrides config file)
    #[arg(long)]
    pub res_path: Option<PathBuf>,

    /// Leave out comments no engineer provided
    #[arg(long)]
    pub strip_comments: bool,

    /// Only merge tables of this development language (overrides config file)
    #[arg(long)]
    pub language: Option<String>,

    /// Skip malformed tables instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

#[derive(Debug, Args)]
pub struct OutputStringsCommand {
    #[command(flatten)]
    pub args: OutputStringsArgs,
}

#[derive(Debug, Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub paths: DiffPaths,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub args: RunArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the changes needed to bring the namespaces in line with their uses
    Diff(DiffCommand),
    /// Create a source file with a new, empty string namespace
    GenerateNamespace(GenerateNamespaceCommand),
    /// Rewrite the namespace declarations according to a diff
    GenerateSource(GenerateSourceCommand),
    /// Extract the strings tables and merge them into the existing resources
    OutputStrings(OutputStringsCommand),
    /// Compute the diff and apply it in one step
    Run(RunCommand),
}
