//! Visitor over declarations and expressions.

use super::SourceFile;
use super::expr::{CallExpr, MemberAccess, scan_expressions};
use super::syntax::{Decl, ExtensionDecl, FunctionDecl, TypeDecl, VariableDecl};

/// Whether a visitor wants the members of the declaration it just saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    Children,
    Skip,
}

/// Hooks called while walking a [`SourceFile`]. All hooks default to no-ops.
///
/// Post hooks run after the members of a declaration, whether or not the
/// children were visited.
pub trait Visit {
    fn visit_extension(&mut self, _node: &ExtensionDecl) -> VisitFlow {
        VisitFlow::Children
    }

    fn visit_extension_post(&mut self, _node: &ExtensionDecl) {}

    fn visit_type_decl(&mut self, _node: &TypeDecl) -> VisitFlow {
        VisitFlow::Children
    }

    fn visit_type_decl_post(&mut self, _node: &TypeDecl) {}

    fn visit_variable(&mut self, _node: &VariableDecl) {}

    fn visit_function(&mut self, _node: &FunctionDecl) {}

    fn visit_member_access(&mut self, _node: &MemberAccess) {}

    fn visit_call(&mut self, _node: &CallExpr) {}
}

pub trait VisitWith<V: Visit + ?Sized> {
    fn visit_with(&self, visitor: &mut V);
}

impl<V: Visit + ?Sized> VisitWith<V> for Decl {
    fn visit_with(&self, visitor: &mut V) {
        match self {
            Decl::Extension(ext) => {
                if visitor.visit_extension(ext) == VisitFlow::Children {
                    ext.body.members.visit_with(visitor);
                }
                visitor.visit_extension_post(ext);
            }
            Decl::Type(ty) => {
                if visitor.visit_type_decl(ty) == VisitFlow::Children {
                    ty.body.members.visit_with(visitor);
                }
                visitor.visit_type_decl_post(ty);
            }
            Decl::Variable(var) => visitor.visit_variable(var),
            Decl::Function(func) => visitor.visit_function(func),
            Decl::Other(_) => {}
        }
    }
}

impl<V: Visit + ?Sized> VisitWith<V> for [Decl] {
    fn visit_with(&self, visitor: &mut V) {
        for decl in self {
            decl.visit_with(visitor);
        }
    }
}

impl<V: Visit + ?Sized> VisitWith<V> for Vec<Decl> {
    fn visit_with(&self, visitor: &mut V) {
        self.as_slice().visit_with(visitor);
    }
}

/// Visits the declaration tree, then every expression in the file.
impl<V: Visit + ?Sized> VisitWith<V> for SourceFile {
    fn visit_with(&self, visitor: &mut V) {
        self.visit_declarations(visitor);
        self.visit_expressions(visitor);
    }
}

impl SourceFile {
    pub fn visit_declarations<V: Visit + ?Sized>(&self, visitor: &mut V) {
        self.declarations.visit_with(visitor);
    }

    pub fn visit_expressions<V: Visit + ?Sized>(&self, visitor: &mut V) {
        scan_expressions(self.tree.root_node(), &self.text, visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    impl Visit for Trace {
        fn visit_extension(&mut self, node: &ExtensionDecl) -> VisitFlow {
            self.events.push(format!("ext {}", node.extended_type));
            VisitFlow::Children
        }

        fn visit_extension_post(&mut self, node: &ExtensionDecl) {
            self.events.push(format!("/ext {}", node.extended_type));
        }

        fn visit_type_decl(&mut self, node: &TypeDecl) -> VisitFlow {
            self.events.push(format!("type {}", node.name));
            if node.name == "Skipped" {
                VisitFlow::Skip
            } else {
                VisitFlow::Children
            }
        }

        fn visit_type_decl_post(&mut self, node: &TypeDecl) {
            self.events.push(format!("/type {}", node.name));
        }

        fn visit_variable(&mut self, node: &VariableDecl) {
            self.events.push(format!("var {}", node.name));
        }

        fn visit_function(&mut self, node: &FunctionDecl) {
            self.events.push(format!("func {}", node.name));
        }
    }

    #[test]
    fn test_walk_order_and_skip() {
        let source = r#"
extension A {
    class Kept {
        var a: Int = 0
        func b() {}
    }
    struct Skipped {
        var hidden = 1
    }
}
"#;
        let file = SourceFile::parse("A.swift", source.to_string()).unwrap();
        let mut trace = Trace::default();
        file.visit_declarations(&mut trace);
        assert_eq!(
            trace.events,
            vec![
                "ext A",
                "type Kept",
                "var a",
                "func b",
                "/type Kept",
                "type Skipped",
                "/type Skipped",
                "/ext A",
            ]
        );
    }
}
