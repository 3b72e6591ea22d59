//! Owned declaration view lowered from the concrete syntax tree.

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl From<tree_sitter::Node<'_>> for Span {
    fn from(node: tree_sitter::Node<'_>) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Extension(ExtensionDecl),
    Type(TypeDecl),
    Variable(VariableDecl),
    Function(FunctionDecl),
    /// Anything else: initializers, subscripts, typealiases, statements.
    Other(OtherDecl),
}

impl Decl {
    /// Full extent of the declaration including attached leading comments.
    pub fn span(&self) -> Span {
        match self {
            Decl::Extension(d) => d.span,
            Decl::Type(d) => d.span,
            Decl::Variable(d) => d.span,
            Decl::Function(d) => d.span,
            Decl::Other(d) => d.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDecl {
    pub span: Span,
    /// Dotted name of the extended type with whitespace removed.
    pub extended_type: String,
    pub inheritance: Vec<String>,
    pub body: MemberBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Protocol,
    Actor,
}

impl TypeKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "struct" => Some(TypeKind::Struct),
            "enum" => Some(TypeKind::Enum),
            "protocol" => Some(TypeKind::Protocol),
            "actor" => Some(TypeKind::Actor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub span: Span,
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub inheritance: Vec<String>,
    pub body: MemberBlock,
}

/// Braced body of a type or extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBlock {
    /// Span of the `{` token.
    pub open: Span,
    /// Span of the `}` token.
    pub close: Span,
    pub members: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub span: Span,
    pub modifiers: Vec<String>,
    /// `let` rather than `var`.
    pub is_constant: bool,
    pub name: String,
    pub type_annotation: Option<String>,
}

impl VariableDecl {
    pub fn is_static(&self) -> bool {
        has_static(&self.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub span: Span,
    pub modifiers: Vec<String>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
}

impl FunctionDecl {
    pub fn is_static(&self) -> bool {
        has_static(&self.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// External label; `_` when the argument is unlabeled.
    pub first_name: String,
    pub second_name: Option<String>,
    pub type_name: String,
}

impl Parameter {
    /// Argument label seen at the call site, `None` for `_`.
    pub fn label(&self) -> Option<&str> {
        match self.first_name.as_str() {
            "_" => None,
            name => Some(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherDecl {
    pub span: Span,
}

fn has_static(modifiers: &[String]) -> bool {
    modifiers.iter().any(|m| m == "static" || m == "class")
}

/// Strip the backticks of an escaped identifier.
pub fn unescape_identifier(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text)
}
