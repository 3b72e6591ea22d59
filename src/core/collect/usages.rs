//! Usage extraction: which namespace members the code references.

use crate::core::{
    collect::types::CandidateRegistry,
    source::{CallExpr, MemberAccess, SourceFile, Visit},
    symbols::{ArgumentShape, FunctionSymbol, ROOT_NAMESPACE, is_below, looks_like_type, split_leaf},
};

pub struct UsageCollector {
    pub candidates: CandidateRegistry,
}

impl UsageCollector {
    pub fn new(known_namespaces: &[String]) -> Self {
        Self {
            candidates: CandidateRegistry::seeded(known_namespaces.iter().cloned()),
        }
    }
}

impl Visit for UsageCollector {
    fn visit_member_access(&mut self, node: &MemberAccess) {
        let path = node.dotted();
        if !is_below(&path, ROOT_NAMESPACE) {
            return;
        }
        let Some((parent, leaf)) = split_leaf(&path) else {
            return;
        };
        // Nested namespace segment.
        if looks_like_type(leaf) {
            return;
        }
        if !self.candidates.record_member_access(parent, leaf) {
            self.candidates.record_unresolved(path.clone());
        }
    }

    fn visit_call(&mut self, node: &CallExpr) {
        let callee = node.dotted_callee();
        if !is_below(&callee, ROOT_NAMESPACE) {
            return;
        }
        let Some((parent, name)) = split_leaf(&callee) else {
            return;
        };
        // Initializer call.
        if looks_like_type(name) {
            return;
        }
        let symbol = ArgumentShape::from_labels(node.arguments.iter().map(|a| a.label.clone()))
            .map(|shape| FunctionSymbol::new(name, shape));
        if !self.candidates.record_call(parent, name, symbol) {
            self.candidates.record_unresolved(callee.clone());
        }
    }
}

/// Build the candidate registry from parsed usage files.
pub fn collect_usages(files: &[SourceFile], known_namespaces: &[String]) -> CandidateRegistry {
    let mut collector = UsageCollector::new(known_namespaces);
    for file in files {
        file.visit_expressions(&mut collector);
    }
    collector.candidates
}
