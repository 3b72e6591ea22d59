//! Hexicon - keeps Swift localization namespaces in sync with their uses
//!
//! Hexicon reads the string namespaces declared under `Localized.Strings`,
//! finds every reference to them in a project, and rewrites the declarations
//! so that each used string has an accessor and unused accessors disappear.
//! It also merges freshly extracted `.strings` tables into the project's
//! resources without losing existing translations.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Source model, extraction, diff, synthesis and resource tables
//! - `error`: Library error type

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use error::{HexiconError, Result};
