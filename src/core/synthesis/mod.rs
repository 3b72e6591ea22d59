//! Synthesis: rewrite a namespace declaration to match a changeset.
//!
//! The namespace class is located by qualified name, its member list is
//! rebuilt (kept and new properties by name, then kept and new functions by
//! name, then any other members in their original order) and the body text
//! between the braces is replaced. Everything outside the body is untouched.

pub mod builders;

use std::{fs, path::Path};

use crate::{
    core::{
        diff::Changeset,
        source::{
            Decl, Edit, ExtensionDecl, SourceError, SourceFile, Span, TypeDecl, Visit, VisitFlow,
        },
        symbols::{
            ArgumentShape, DEFAULT_TABLE_NAME, FunctionSymbol, NAMESPACE_MARKER, ROOT_NAMESPACE,
            is_below, simple_name,
        },
    },
    error::HexiconError,
};

use builders::{LookupStyle, function_decl, property_decl};

const INDENT_UNIT: &str = "    ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub use_custom_bundle: bool,
    pub use_table_name: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Rewritten,
    /// The origin file no longer declares the changeset's namespace.
    NamespaceNotFound,
}

/// Finds the type declaration whose qualified name is `namespace`. A
/// top-level namespace type is qualified under the root namespace.
struct TargetFinder<'a> {
    namespace: &'a str,
    scope: Vec<String>,
    found: Option<TypeDecl>,
}

impl TargetFinder<'_> {
    fn enter(&mut self, name: &str) -> String {
        self.scope.push(name.to_string());
        self.scope.join(".")
    }
}

impl Visit for TargetFinder<'_> {
    fn visit_extension(&mut self, node: &ExtensionDecl) -> VisitFlow {
        let path = self.enter(&node.extended_type);
        if self.found.is_none() && is_below(self.namespace, &path) {
            VisitFlow::Children
        } else {
            VisitFlow::Skip
        }
    }

    fn visit_extension_post(&mut self, _node: &ExtensionDecl) {
        self.scope.pop();
    }

    fn visit_type_decl(&mut self, node: &TypeDecl) -> VisitFlow {
        let top_level_namespace =
            self.scope.is_empty() && node.inheritance.iter().any(|t| t == NAMESPACE_MARKER);
        let path = if top_level_namespace {
            self.enter(&format!("{}.{}", ROOT_NAMESPACE, node.name))
        } else {
            self.enter(&node.name)
        };
        if self.found.is_some() {
            return VisitFlow::Skip;
        }
        if path == self.namespace {
            self.found = Some(node.clone());
            VisitFlow::Skip
        } else if is_below(self.namespace, &path) {
            VisitFlow::Children
        } else {
            VisitFlow::Skip
        }
    }

    fn visit_type_decl_post(&mut self, _node: &TypeDecl) {
        self.scope.pop();
    }
}

pub fn find_namespace(file: &SourceFile, namespace: &str) -> Option<TypeDecl> {
    let mut finder = TargetFinder {
        namespace,
        scope: Vec::new(),
        found: None,
    };
    file.visit_declarations(&mut finder);
    finder.found
}

/// Apply `changeset` to `file`, returning the re-parsed result, or `None`
/// when the namespace is not declared in `file`.
pub fn synthesize(
    file: &SourceFile,
    changeset: &Changeset,
    options: SynthesisOptions,
) -> Result<Option<SourceFile>, SourceError> {
    let Some(target) = find_namespace(file, &changeset.namespace) else {
        return Ok(None);
    };

    let table_name = match simple_name(&changeset.namespace) {
        "" => DEFAULT_TABLE_NAME,
        name => name,
    };
    let style = LookupStyle {
        use_custom_bundle: options.use_custom_bundle,
        table_name: options.use_table_name.then_some(table_name),
    };

    let members = &target.body.members;
    let type_indent = file.indentation_at(target.span.start).to_string();
    let member_indent = match members.first() {
        Some(first) if file.text[target.body.open.end..first.span().start].contains('\n') => {
            file.indentation_at(first.span().start).to_string()
        }
        _ => format!("{}{}", type_indent, INDENT_UNIT),
    };

    let mut properties: Vec<(String, String)> = Vec::new();
    let mut functions: Vec<(String, String)> = Vec::new();
    let mut others: Vec<String> = Vec::new();
    let mut existing_functions: Vec<FunctionSymbol> = Vec::new();

    for member in members {
        let text = format!("{}{}", member_indent, member.span().slice(&file.text));
        match member {
            Decl::Variable(var) => {
                if !changeset.deleted_properties.contains(&var.name) {
                    properties.push((var.name.clone(), text));
                }
            }
            Decl::Function(func) => {
                let shape =
                    ArgumentShape::from_labels(func.parameters.iter().map(|p| p.label()));
                let deleted = shape.is_some_and(|arguments| {
                    let symbol = FunctionSymbol::new(func.name.clone(), arguments);
                    let deleted = changeset.deleted_functions.contains(&symbol);
                    existing_functions.push(symbol);
                    deleted
                });
                if !deleted {
                    functions.push((func.name.clone(), text));
                }
            }
            _ => others.push(text),
        }
    }

    for name in &changeset.added_properties {
        if properties.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        properties.push((name.clone(), indent(&property_decl(name, &style), &member_indent)));
    }
    for symbol in &changeset.added_functions {
        if existing_functions.contains(symbol) {
            continue;
        }
        existing_functions.push(symbol.clone());
        functions.push((
            symbol.name.clone(),
            indent(&function_decl(symbol, &style), &member_indent),
        ));
    }

    properties.sort_by(|a, b| a.0.cmp(&b.0));
    functions.sort_by(|a, b| a.0.cmp(&b.0));

    let rendered: Vec<String> = properties
        .into_iter()
        .chain(functions)
        .map(|(_, text)| text)
        .chain(others)
        .collect();
    let body = if rendered.is_empty() {
        format!("\n\n{}", type_indent)
    } else {
        format!("\n\n{}\n\n{}", rendered.join("\n\n"), type_indent)
    };

    let edit = Edit::new(Span::new(target.body.open.end, target.body.close.start), body);
    file.rewrite(vec![edit]).map(Some)
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read the changeset's origin file, rewrite it and write it back.
pub fn apply_changeset(
    changeset: &Changeset,
    origin: &Path,
    options: SynthesisOptions,
) -> Result<SynthesisOutcome, HexiconError> {
    let file = SourceFile::read(origin)?;
    match synthesize(&file, changeset, options)? {
        Some(rewritten) => {
            fs::write(origin, rewritten.render())
                .map_err(|source| HexiconError::io(format!("writing {}", origin.display()), source))?;
            Ok(SynthesisOutcome::Rewritten)
        }
        None => Ok(SynthesisOutcome::NamespaceNotFound),
    }
}
