//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with the command's summary, ready to be reported
//! - `Err` if the command fails (bad arguments, unparsable sources, I/O errors)

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, diff::diff, generate_namespace::generate_namespace,
        generate_source::generate_source, output_strings::output_strings,
        run_generation::run_generation,
    },
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Diff(cmd)) => diff(cmd),
        Some(Command::GenerateNamespace(cmd)) => generate_namespace(cmd),
        Some(Command::GenerateSource(cmd)) => generate_source(cmd),
        Some(Command::OutputStrings(cmd)) => output_strings(cmd),
        Some(Command::Run(cmd)) => run_generation(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
