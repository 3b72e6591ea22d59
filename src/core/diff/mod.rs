//! Diff between declared and referenced namespace symbols.
//!
//! A [`Diff`] is the contract between `diff` and `generate-source`: it is
//! encoded to text by [`codec`], may be edited by hand, and is decoded again
//! before synthesis.

pub mod codec;

use std::path::PathBuf;

pub use codec::{DiffDecodeError, decode, encode};

use crate::core::{
    collect::{CandidateRegistry, DefinitionRegistry},
    symbols::FunctionSymbol,
};

/// Additions and deletions needed to reconcile one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub origin: PathBuf,
    pub namespace: String,
    pub added_properties: Vec<String>,
    pub added_functions: Vec<FunctionSymbol>,
    pub deleted_properties: Vec<String>,
    pub deleted_functions: Vec<FunctionSymbol>,
}

impl Changeset {
    /// Build a changeset with properties sorted and functions sorted by name.
    ///
    /// The function sort is stable: overloads sharing a name keep the order
    /// they were given in, so a decoded diff keeps its written order.
    pub fn new(
        origin: impl Into<PathBuf>,
        namespace: impl Into<String>,
        mut added_properties: Vec<String>,
        mut added_functions: Vec<FunctionSymbol>,
        mut deleted_properties: Vec<String>,
        mut deleted_functions: Vec<FunctionSymbol>,
    ) -> Self {
        added_properties.sort();
        deleted_properties.sort();
        added_functions.sort_by(|a, b| a.name.cmp(&b.name));
        deleted_functions.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            origin: origin.into(),
            namespace: namespace.into(),
            added_properties,
            added_functions,
            deleted_properties,
            deleted_functions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added_properties.is_empty()
            && self.added_functions.is_empty()
            && self.deleted_properties.is_empty()
            && self.deleted_functions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub changes: Vec<Changeset>,
    /// References that matched no known namespace, reported but never applied.
    pub skipped: Vec<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.skipped.is_empty()
    }
}

/// Compare every declared namespace against its observed references.
///
/// Changesets come out in namespace-name order; namespaces with nothing to
/// change are omitted. Functions are taken from ordered sets, so overloads of
/// one name come out by argument shape: no arguments, then unlabeled by
/// count, then labeled by label list.
pub fn compute_diff(definitions: &DefinitionRegistry, candidates: &CandidateRegistry) -> Diff {
    let mut changes = Vec::new();
    for namespace in definitions.namespaces() {
        let Some(candidate) = candidates.get(&namespace.name) else {
            continue;
        };
        let properties = candidate.properties();
        let changeset = Changeset::new(
            &namespace.origin,
            &namespace.name,
            properties
                .difference(&namespace.properties)
                .cloned()
                .collect(),
            candidate
                .functions
                .difference(&namespace.functions)
                .cloned()
                .collect(),
            namespace
                .properties
                .difference(&properties)
                .cloned()
                .collect(),
            namespace
                .functions
                .difference(&candidate.functions)
                .cloned()
                .collect(),
        );
        if !changeset.is_empty() {
            changes.push(changeset);
        }
    }
    Diff {
        changes,
        skipped: candidates.unresolved().to_vec(),
    }
}
