//! Registries built by the collection phase.
//!
//! The [`DefinitionRegistry`] holds what the namespace declarations say, the
//! [`CandidateRegistry`] holds what the rest of the code actually references.
//! Both are keyed by qualified namespace name and iterate in name order.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::PathBuf,
};

use crate::core::symbols::{FunctionSymbol, ROOT_NAMESPACE};

/// A declared namespace and the symbols inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// File the namespace class is declared in.
    pub origin: PathBuf,
    /// Qualified name, e.g. `Localized.Strings.Settings`.
    pub name: String,
    pub properties: BTreeSet<String>,
    pub functions: BTreeSet<FunctionSymbol>,
}

impl Namespace {
    pub fn new(origin: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            name: name.into(),
            properties: BTreeSet::new(),
            functions: BTreeSet::new(),
        }
    }
}

/// A namespace declared more than once; the first declaration wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateNamespace {
    pub name: String,
    pub kept: PathBuf,
    pub ignored: PathBuf,
}

/// Namespaces found in the definition files.
///
/// The root namespace is always known but never holds symbols.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    namespaces: BTreeMap<String, Namespace>,
    pub duplicates: Vec<DuplicateNamespace>,
}

impl DefinitionRegistry {
    pub fn insert(&mut self, namespace: Namespace) {
        match self.namespaces.get(&namespace.name) {
            Some(existing) => self.duplicates.push(DuplicateNamespace {
                name: namespace.name,
                kept: existing.origin.clone(),
                ignored: namespace.origin,
            }),
            None => {
                self.namespaces.insert(namespace.name.clone(), namespace);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Declared namespaces in name order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    /// Every namespace usages may resolve against, root first.
    pub fn known_names(&self) -> Vec<String> {
        std::iter::once(ROOT_NAMESPACE.to_string())
            .chain(self.namespaces.keys().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Observed references into one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Leaves of member-access chains, including callees seen before their call.
    pub member_accesses: BTreeSet<String>,
    /// Names that were called, whether or not the call had a usable shape.
    pub callees: BTreeSet<String>,
    pub functions: BTreeSet<FunctionSymbol>,
}

impl Candidates {
    /// Referenced properties: member-access leaves that were never called.
    pub fn properties(&self) -> BTreeSet<String> {
        self.member_accesses
            .difference(&self.callees)
            .cloned()
            .collect()
    }
}

/// References found in the scanned sources, seeded with every known
/// namespace so unreferenced namespaces still diff.
#[derive(Debug, Clone, Default)]
pub struct CandidateRegistry {
    entries: BTreeMap<String, Candidates>,
    unresolved: Vec<String>,
    seen_unresolved: HashSet<String>,
}

impl CandidateRegistry {
    pub fn seeded<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: known
                .into_iter()
                .map(|name| (name.into(), Candidates::default()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn is_known(&self, namespace: &str) -> bool {
        self.entries.contains_key(namespace)
    }

    pub fn get(&self, namespace: &str) -> Option<&Candidates> {
        self.entries.get(namespace)
    }

    /// Record a member access; returns `false` if the namespace is unknown.
    pub fn record_member_access(&mut self, namespace: &str, leaf: &str) -> bool {
        match self.entries.get_mut(namespace) {
            Some(entry) => {
                entry.member_accesses.insert(leaf.to_string());
                true
            }
            None => false,
        }
    }

    /// Record a call; a `None` symbol still marks the name as called.
    /// Returns `false` if the namespace is unknown.
    pub fn record_call(
        &mut self,
        namespace: &str,
        callee: &str,
        symbol: Option<FunctionSymbol>,
    ) -> bool {
        match self.entries.get_mut(namespace) {
            Some(entry) => {
                entry.callees.insert(callee.to_string());
                entry.functions.extend(symbol);
                true
            }
            None => false,
        }
    }

    pub fn record_unresolved(&mut self, reference: String) {
        if self.seen_unresolved.insert(reference.clone()) {
            self.unresolved.push(reference);
        }
    }

    /// Unresolved references in first-seen order, without duplicates.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }
}
