//! Collection: declared namespaces and observed references.
//!
//! - `definitions`: walks definition files into a [`DefinitionRegistry`]
//! - `usages`: walks usage files into a [`CandidateRegistry`]
//!
//! Both consume parsed [`SourceFile`](crate::core::source::SourceFile)s; a
//! file that fails to parse never reaches this phase.

pub mod definitions;
pub mod types;
pub mod usages;

pub use definitions::{NamespaceCollector, collect_definitions};
pub use types::*;
pub use usages::{UsageCollector, collect_usages};
