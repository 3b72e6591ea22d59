//! Namespace extraction from definition files.
//!
//! A namespace is a type inheriting `LocalizationNamespace`, declared either
//! directly inside `extension Localized.Strings` or at the top level of a
//! file. Both are qualified as `Localized.Strings.<Name>`. Only one namespace
//! may be open at a time; types nested in an open namespace are skipped
//! entirely.

use std::path::Path;

use crate::core::{
    collect::types::{DefinitionRegistry, Namespace},
    source::{
        ExtensionDecl, FunctionDecl, SourceFile, Span, TypeDecl, VariableDecl, Visit, VisitFlow,
    },
    symbols::{ArgumentShape, FunctionSymbol, NAMESPACE_MARKER, ROOT_NAMESPACE, STRING_TYPE},
};

/// Visitor collecting the namespaces declared in one file.
pub struct NamespaceCollector<'a> {
    path: &'a Path,
    /// Span of the root extension being walked.
    root_extension: Option<Span>,
    /// Number of enclosing type and extension declarations.
    depth: usize,
    /// Span of the open namespace type and the namespace being filled.
    in_progress: Option<(Span, Namespace)>,
    pub namespaces: Vec<Namespace>,
}

impl<'a> NamespaceCollector<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            root_extension: None,
            depth: 0,
            in_progress: None,
            namespaces: Vec::new(),
        }
    }

    fn current(&mut self) -> Option<&mut Namespace> {
        self.in_progress.as_mut().map(|(_, namespace)| namespace)
    }
}

impl Visit for NamespaceCollector<'_> {
    fn visit_extension(&mut self, node: &ExtensionDecl) -> VisitFlow {
        self.depth += 1;
        if self.depth == 1 && node.extended_type == ROOT_NAMESPACE {
            self.root_extension = Some(node.span);
            VisitFlow::Children
        } else {
            VisitFlow::Skip
        }
    }

    fn visit_extension_post(&mut self, node: &ExtensionDecl) {
        self.depth -= 1;
        if self.root_extension == Some(node.span) {
            self.root_extension = None;
        }
    }

    fn visit_type_decl(&mut self, node: &TypeDecl) -> VisitFlow {
        self.depth += 1;
        let is_namespace = node.inheritance.iter().any(|t| t == NAMESPACE_MARKER);
        let top_level = self.depth == 1;
        let in_root = self.root_extension.is_some() && self.depth == 2;
        if self.in_progress.is_some() || !is_namespace || !(top_level || in_root) {
            return VisitFlow::Skip;
        }
        let name = format!("{}.{}", ROOT_NAMESPACE, node.name);
        self.in_progress = Some((node.span, Namespace::new(self.path, name)));
        VisitFlow::Children
    }

    fn visit_type_decl_post(&mut self, node: &TypeDecl) {
        self.depth -= 1;
        let closes = self
            .in_progress
            .as_ref()
            .is_some_and(|(span, _)| *span == node.span);
        if closes && let Some((_, namespace)) = self.in_progress.take() {
            self.namespaces.push(namespace);
        }
    }

    fn visit_variable(&mut self, node: &VariableDecl) {
        if !node.is_static() || node.type_annotation.as_deref() != Some(STRING_TYPE) {
            return;
        }
        if let Some(namespace) = self.current() {
            namespace.properties.insert(node.name.clone());
        }
    }

    fn visit_function(&mut self, node: &FunctionDecl) {
        if !node.is_static() || node.return_type.as_deref() != Some(STRING_TYPE) {
            return;
        }
        let Some(arguments) = ArgumentShape::from_labels(node.parameters.iter().map(|p| p.label()))
        else {
            return;
        };
        if let Some(namespace) = self.current() {
            namespace
                .functions
                .insert(FunctionSymbol::new(node.name.clone(), arguments));
        }
    }
}

/// Build the definition registry from parsed definition files.
pub fn collect_definitions(files: &[SourceFile]) -> DefinitionRegistry {
    let mut registry = DefinitionRegistry::default();
    for file in files {
        let mut collector = NamespaceCollector::new(&file.path);
        file.visit_declarations(&mut collector);
        for namespace in collector.namespaces {
            registry.insert(namespace);
        }
    }
    registry
}
