//! Core engine: the source model, namespace and usage extraction, the diff
//! engine and its codec, synthesis, and `.strings` resource tables.

pub mod collect;
pub mod context;
pub mod diff;
pub mod extraction_tool;
pub mod file_scanner;
pub mod resources;
pub mod source;
pub mod symbols;
pub mod synthesis;

pub use context::ProjectContext;
