//! Member-access and call expressions recovered from the syntax tree.

use tree_sitter::Node;

use super::syntax::{Span, unescape_identifier};
use super::visit::Visit;

/// A dotted member-access chain such as `Localized.Strings.Foo.title`.
///
/// One event is produced per `.member` extension, so `A.B.C` yields `A.B`
/// followed by `A.B.C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    pub path: Vec<String>,
    pub span: Span,
}

impl MemberAccess {
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgument {
    pub label: Option<String>,
}

/// A call whose callee is a plain or dotted name, e.g. `A.B.f(label: x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Vec<String>,
    pub arguments: Vec<CallArgument>,
    pub span: Span,
}

impl CallExpr {
    pub fn dotted_callee(&self) -> String {
        self.callee.join(".")
    }
}

/// Walk the subtree under `node`, reporting member accesses and calls to
/// `visitor` in post-order: call arguments and string interpolations are
/// reported before the enclosing call, and shorter chains before longer ones.
pub fn scan_expressions<V: Visit + ?Sized>(node: Node<'_>, source: &str, visitor: &mut V) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        scan_expressions(child, source, visitor);
    }
    match node.kind() {
        "navigation_expression" => report_access(node, source, visitor),
        "call_expression" => report_call(node, source, visitor),
        _ => {}
    }
}

fn report_access<V: Visit + ?Sized>(node: Node<'_>, source: &str, visitor: &mut V) {
    let Some(path) = dotted_path(node, source) else {
        return;
    };
    // `A.B.c` may parse with `A.B` as a single type node, which the walk
    // never reports on its own.
    if let Some(target) = node.child_by_field_name("target")
        && target.kind() == "user_type"
        && let Some(segments) = type_segments(target)
    {
        for end in 2..=segments.len() {
            visitor.visit_member_access(&MemberAccess {
                path: path[..end].to_vec(),
                span: Span::new(segments[0].start_byte(), segments[end - 1].end_byte()),
            });
        }
    }
    visitor.visit_member_access(&MemberAccess {
        path,
        span: Span::from(node),
    });
}

fn report_call<V: Visit + ?Sized>(node: Node<'_>, source: &str, visitor: &mut V) {
    let Some(callee) = node.named_child(0).and_then(|c| dotted_path(c, source)) else {
        return;
    };
    let mut cursor = node.walk();
    let Some(suffix) = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "call_suffix")
    else {
        return;
    };
    let mut cursor = suffix.walk();
    let value_arguments = suffix
        .named_children(&mut cursor)
        .find(|c| c.kind() == "value_arguments");

    let arguments = match value_arguments {
        // `a.b[0]` is a subscript, not a call.
        Some(list) if list.child(0).is_some_and(|open| open.kind() == "[") => return,
        Some(list) => {
            let mut cursor = list.walk();
            list.named_children(&mut cursor)
                .filter(|arg| arg.kind() == "value_argument")
                .map(|arg| CallArgument {
                    label: arg
                        .child_by_field_name("name")
                        .map(|label| identifier(label, source)),
                })
                .collect()
        }
        // Trailing closures only.
        None => Vec::new(),
    };

    visitor.visit_call(&CallExpr {
        callee,
        arguments,
        span: Span::from(node),
    });
}

/// Name segments of a plain identifier, a navigation chain of identifiers or a
/// dotted type without generic arguments.
fn dotted_path(node: Node<'_>, source: &str) -> Option<Vec<String>> {
    match node.kind() {
        "simple_identifier" => Some(vec![identifier(node, source)]),
        "user_type" => Some(
            type_segments(node)?
                .into_iter()
                .map(|segment| identifier(segment, source))
                .collect(),
        ),
        "navigation_expression" => {
            let member = node
                .child_by_field_name("suffix")?
                .child_by_field_name("suffix")?;
            if member.kind() != "simple_identifier" {
                return None;
            }
            let mut path = dotted_path(node.child_by_field_name("target")?, source)?;
            path.push(identifier(member, source));
            Some(path)
        }
        _ => None,
    }
}

fn type_segments(node: Node<'_>) -> Option<Vec<Node<'_>>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|child| (child.kind() == "type_identifier").then_some(child))
        .collect()
}

fn identifier(node: Node<'_>, source: &str) -> String {
    unescape_identifier(&source[node.byte_range()]).to_string()
}
