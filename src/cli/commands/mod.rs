mod command_result;
pub mod diff;
pub mod generate_namespace;
pub mod generate_source;
pub mod output_strings;
pub mod run_generation;

pub use command_result::*;
