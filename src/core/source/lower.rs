//! Parsing with the tree-sitter Swift grammar, and lowering of the concrete
//! syntax tree into the owned [`Decl`] view.
//!
//! Only the shapes the namespace tooling cares about are told apart: types and
//! extensions with their member blocks, properties and functions. Everything
//! else becomes an [`OtherDecl`] that still carries its span, so a rewrite can
//! reproduce it byte-for-byte.

use tree_sitter::{Node, Parser, Tree};

use super::SyntaxError;
use super::syntax::{
    Decl, ExtensionDecl, FunctionDecl, MemberBlock, OtherDecl, Parameter, Span, TypeDecl,
    TypeKind, VariableDecl, unescape_identifier,
};

const COMMENT_KINDS: [&str; 2] = ["comment", "multiline_comment"];

/// Longest excerpt of offending text quoted in a syntax error.
const EXCERPT_CHARS: usize = 24;

/// Parse `text`, rejecting any tree that needed error recovery.
pub(super) fn parse_tree(text: &str) -> Result<Tree, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_swift::LANGUAGE.into())
        .map_err(|err| SyntaxError::new(0, format!("cannot load the Swift grammar: {err}")))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| SyntaxError::new(0, "parser produced no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(match first_error(root) {
            Some(node) => describe_error(node, text),
            None => SyntaxError::new(root.start_byte(), "syntax error"),
        });
    }
    Ok(tree)
}

/// The first ERROR or MISSING node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn describe_error(node: Node<'_>, text: &str) -> SyntaxError {
    if node.is_missing() {
        return SyntaxError::new(node.start_byte(), format!("expected `{}`", node.kind()));
    }
    let line = text[node.byte_range()].lines().next().unwrap_or_default().trim();
    let excerpt = match line.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => &line[..end],
        None => line,
    };
    if excerpt.is_empty() {
        SyntaxError::new(node.start_byte(), "syntax error")
    } else {
        SyntaxError::new(node.start_byte(), format!("unexpected `{excerpt}`"))
    }
}

/// Lower the top-level statements of `tree`.
pub(super) fn lower(tree: &Tree, text: &str) -> Vec<Decl> {
    Lowering { text }.members(tree.root_node(), 0)
}

struct Lowering<'a> {
    text: &'a str,
}

impl<'a> Lowering<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        &self.text[node.byte_range()]
    }

    /// Lower the named children of `parent`. A declaration's span starts at
    /// the first comment written on the lines directly above it; a comment
    /// trailing the previous member on its own line is not attached.
    fn members(&self, parent: Node<'_>, mut prev_end: usize) -> Vec<Decl> {
        let mut decls = Vec::new();
        let mut leading = None;
        let mut cursor = parent.walk();
        for child in parent.named_children(&mut cursor) {
            if COMMENT_KINDS.contains(&child.kind()) {
                let own_line =
                    prev_end == 0 || self.text[prev_end..child.start_byte()].contains('\n');
                if leading.is_none() && own_line {
                    leading = Some(child.start_byte());
                }
                continue;
            }
            let start = leading.take().unwrap_or(child.start_byte());
            decls.push(self.decl(child, Span::new(start, child.end_byte())));
            prev_end = child.end_byte();
        }
        decls
    }

    fn decl(&self, node: Node<'_>, span: Span) -> Decl {
        let lowered = match node.kind() {
            "class_declaration" | "protocol_declaration" => self.type_or_extension(node, span),
            "property_declaration" => self.variable(node, span).map(Decl::Variable),
            "function_declaration" => self.function(node, span).map(Decl::Function),
            _ => None,
        };
        lowered.unwrap_or(Decl::Other(OtherDecl { span }))
    }

    fn block(&self, body: Node<'_>) -> Option<MemberBlock> {
        let mut cursor = body.walk();
        let tokens: Vec<Node<'_>> = body.children(&mut cursor).collect();
        let open = tokens.iter().find(|t| t.kind() == "{")?;
        let close = tokens.iter().rev().find(|t| t.kind() == "}")?;
        Some(MemberBlock {
            open: Span::from(*open),
            close: Span::from(*close),
            members: self.members(body, open.end_byte()),
        })
    }

    fn type_or_extension(&self, node: Node<'_>, span: Span) -> Option<Decl> {
        let keyword = self.text(node.child_by_field_name("declaration_kind")?);
        let name = self.text(node.child_by_field_name("name")?);
        let body = self.block(node.child_by_field_name("body")?)?;
        let inheritance = self.inheritance(node);

        if keyword == "extension" {
            return Some(Decl::Extension(ExtensionDecl {
                span,
                extended_type: name.split_whitespace().collect(),
                inheritance,
                body,
            }));
        }
        Some(Decl::Type(TypeDecl {
            span,
            kind: TypeKind::from_keyword(keyword)?,
            name: unescape_identifier(name).to_string(),
            modifiers: self.modifiers(node),
            inheritance,
            body,
        }))
    }

    fn inheritance(&self, node: Node<'_>) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == "inheritance_specifier")
            .map(|child| collapse_whitespace(self.text(child)))
            .collect()
    }

    /// Keywords of the `modifiers` child, attributes left out. `private(set)`
    /// is reported as `private`.
    fn modifiers(&self, node: Node<'_>) -> Vec<String> {
        let mut cursor = node.walk();
        let Some(list) = node
            .children(&mut cursor)
            .find(|child| child.kind() == "modifiers")
        else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|modifier| modifier.kind() != "attribute")
            .filter_map(|modifier| self.text(modifier).split('(').next())
            .map(|keyword| keyword.trim().to_string())
            .collect()
    }

    fn variable(&self, node: Node<'_>, span: Span) -> Option<VariableDecl> {
        let name = node
            .child_by_field_name("name")?
            .child_by_field_name("bound_identifier")?;
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        let is_constant = children
            .iter()
            .any(|c| c.kind() == "value_binding_pattern" && self.text(*c) == "let");
        let type_annotation = children
            .iter()
            .find(|c| c.kind() == "type_annotation")
            .map(|c| collapse_whitespace(self.text(*c).trim_start_matches(':')));

        Some(VariableDecl {
            span,
            modifiers: self.modifiers(node),
            is_constant,
            name: unescape_identifier(self.text(name)).to_string(),
            type_annotation,
        })
    }

    fn function(&self, node: Node<'_>, span: Span) -> Option<FunctionDecl> {
        let name = node.child_by_field_name("name")?;
        let mut modifiers = self.modifiers(node);
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        // `class func` puts the keyword outside the modifier list.
        if children.iter().any(|c| !c.is_named() && c.kind() == "class") {
            modifiers.push("class".to_string());
        }
        let parameters = children
            .iter()
            .filter(|c| c.kind() == "parameter")
            .map(|p| self.parameter(*p))
            .collect::<Option<Vec<_>>>()?;

        let mut cursor = node.walk();
        let returns: Vec<Node<'_>> = node
            .children_by_field_name("return_type", &mut cursor)
            .collect();
        let return_type = match (returns.first(), returns.last()) {
            (Some(first), Some(last)) => Some(collapse_whitespace(
                &self.text[first.start_byte()..last.end_byte()],
            )),
            _ => None,
        };

        Some(FunctionDecl {
            span,
            modifiers,
            name: unescape_identifier(self.text(name)).to_string(),
            parameters,
            return_type,
        })
    }

    fn parameter(&self, node: Node<'_>) -> Option<Parameter> {
        let name = unescape_identifier(self.text(node.child_by_field_name("name")?));
        let external = node
            .child_by_field_name("external_name")
            .map(|n| unescape_identifier(self.text(n)));
        let (_, type_name) = self.text(node).split_once(':')?;
        let (first_name, second_name) = match external {
            Some(external) => (external, Some(name)),
            None => (name, None),
        };
        Some(Parameter {
            first_name: first_name.to_string(),
            second_name: second_name.map(str::to_string),
            type_name: collapse_whitespace(type_name),
        })
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> Vec<Decl> {
        let tree = parse_tree(source).unwrap();
        lower(&tree, source)
    }

    fn only_type(decls: &[Decl]) -> &TypeDecl {
        match decls {
            [Decl::Type(t)] => t,
            other => panic!("expected a single type, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_with_namespace_class() {
        let source = r#"
import Hexicon

extension Localized.Strings {
    final class Foo: LocalizationNamespace {
        static var title: String { NSLocalizedString("title", comment: "") }
        static func greet(name: Any) -> String { "" }
    }
}
"#;
        let decls = parse_source(source);
        assert_eq!(decls.len(), 2);
        assert!(matches!(decls[0], Decl::Other(_)));
        let Decl::Extension(ext) = &decls[1] else {
            panic!("expected extension");
        };
        assert_eq!(ext.extended_type, "Localized.Strings");
        let foo = only_type(&ext.body.members);
        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.kind, TypeKind::Class);
        assert_eq!(foo.modifiers, vec!["final"]);
        assert_eq!(foo.inheritance, vec!["LocalizationNamespace"]);
        assert_eq!(foo.body.members.len(), 2);

        let Decl::Variable(title) = &foo.body.members[0] else {
            panic!("expected variable");
        };
        assert_eq!(title.name, "title");
        assert!(title.is_static());
        assert_eq!(title.type_annotation.as_deref(), Some("String"));

        let Decl::Function(greet) = &foo.body.members[1] else {
            panic!("expected function");
        };
        assert_eq!(greet.name, "greet");
        assert_eq!(greet.return_type.as_deref(), Some("String"));
        assert_eq!(greet.parameters.len(), 1);
        assert_eq!(greet.parameters[0].label(), Some("name"));
    }

    #[test]
    fn test_function_parameters() {
        let source = "func f(_ a: Int, at index: Int = 0, values: [String: Int]...) async throws -> [String]? {}";
        let decls = parse_source(source);
        let [Decl::Function(f)] = decls.as_slice() else {
            panic!("expected function, got {:?}", decls);
        };
        let labels: Vec<Option<&str>> = f.parameters.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec![None, Some("at"), Some("values")]);
        assert_eq!(f.parameters[1].second_name.as_deref(), Some("index"));
        assert_eq!(f.parameters[2].type_name, "[String: Int]...");
        assert_eq!(f.return_type.as_deref(), Some("[String]?"));
    }

    #[test]
    fn test_class_keyword_as_modifier() {
        let source = "class A {\n    class var x: String { \"\" }\n    class func y() -> String { \"\" }\n}";
        let decls = parse_source(source);
        let a = only_type(&decls);
        let Decl::Variable(x) = &a.body.members[0] else {
            panic!("expected variable");
        };
        assert!(x.is_static());
        let Decl::Function(y) = &a.body.members[1] else {
            panic!("expected function");
        };
        assert!(y.is_static());
    }

    #[test]
    fn test_other_members_keep_their_span() {
        let source = "class A {\n    init() {\n        x = 1\n    }\n    typealias T = Int\n    private(set) var z = Foo()\n        .bar()\n}";
        let decls = parse_source(source);
        let a = only_type(&decls);
        assert_eq!(a.body.members.len(), 3);
        assert!(matches!(a.body.members[0], Decl::Other(_)));
        assert!(matches!(a.body.members[1], Decl::Other(_)));
        let Decl::Variable(z) = &a.body.members[2] else {
            panic!("expected variable");
        };
        assert_eq!(z.modifiers, vec!["private"]);
        assert!(!z.is_constant);
        assert!(z.span.slice(source).ends_with(".bar()"));
    }

    #[test]
    fn test_leading_comments_attach_to_span() {
        let source = "class A { // trailing\n    /// Docs\n    static var x: String = \"\"\n}";
        let decls = parse_source(source);
        let a = only_type(&decls);
        let span = a.body.members[0].span();
        assert_eq!(span.slice(source), "/// Docs\n    static var x: String = \"\"");
    }

    #[test]
    fn test_attributes_and_generic_inheritance() {
        let source = "@MainActor\npublic final class A: B, C<D<E>> {\n    @objc static let x: String = \"\"\n}";
        let decls = parse_source(source);
        let a = only_type(&decls);
        assert_eq!(a.inheritance, vec!["B", "C<D<E>>"]);
        assert_eq!(a.modifiers, vec!["public", "final"]);
        let Decl::Variable(x) = &a.body.members[0] else {
            panic!("expected variable");
        };
        assert!(x.is_constant);
        assert_eq!(x.modifiers, vec!["static"]);
        assert_eq!(a.body.members.len(), 1);
    }

    #[test]
    fn test_missing_brace_is_an_error() {
        assert!(parse_tree("class A: B {").is_err());
    }
}
