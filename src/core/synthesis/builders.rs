//! Source text for synthesized namespace members.

use std::borrow::Cow;

use crate::core::symbols::{
    ArgumentShape, FunctionSymbol, NAMESPACE_MARKER, ROOT_NAMESPACE, STRING_TYPE,
};

/// Keywords that must be escaped with backticks when used as a member name.
const RESERVED_WORDS: &[&str] = &[
    "as",
    "break",
    "case",
    "class",
    "continue",
    "default",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "for",
    "func",
    "if",
    "import",
    "in",
    "init",
    "internal",
    "is",
    "let",
    "nil",
    "operator",
    "private",
    "protocol",
    "public",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "true",
    "typealias",
    "var",
    "where",
    "while",
];

/// How generated accessors look up their string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStyle<'a> {
    /// Pass `bundle` (the bundle containing the namespaces) instead of `.main`.
    pub use_custom_bundle: bool,
    /// Pass `tableName:` with this table.
    pub table_name: Option<&'a str>,
}

impl LookupStyle<'_> {
    fn call(&self, key: &str) -> String {
        let table = self
            .table_name
            .map(|table| format!("tableName: \"{}\", ", table))
            .unwrap_or_default();
        let bundle = if self.use_custom_bundle {
            "bundle"
        } else {
            ".main"
        };
        format!(
            "NSLocalizedString(\"{}\", {}bundle: {}, comment: \"\")",
            key, table, bundle
        )
    }
}

pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if RESERVED_WORDS.contains(&name) {
        Cow::Owned(format!("`{}`", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// `static var name: String { ... }`, unindented.
pub fn property_decl(name: &str, style: &LookupStyle<'_>) -> String {
    format!(
        "static var {}: {} {{\n    {}\n}}",
        escape_identifier(name),
        STRING_TYPE,
        style.call(name)
    )
}

/// `static func name(...) -> String { ... }`, unindented.
///
/// Unlabeled parameters are named `value1`, `value2`, ...; labeled ones take
/// their label as the parameter name.
pub fn function_decl(symbol: &FunctionSymbol, style: &LookupStyle<'_>) -> String {
    let parameters = match &symbol.arguments {
        ArgumentShape::Empty => Vec::new(),
        ArgumentShape::Unlabeled(count) => (1..=*count)
            .map(|i| format!("_ value{}: Any", i))
            .collect(),
        ArgumentShape::Labeled(labels) => labels
            .iter()
            .map(|label| format!("{}: Any", label))
            .collect(),
    };
    format!(
        "static func {}({}) -> {} {{\n    {}\n}}",
        escape_identifier(&symbol.name),
        parameters.join(", "),
        STRING_TYPE,
        style.call(&symbol.name)
    )
}

/// Whether `name` can be used as a type name without escaping.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !RESERVED_WORDS.contains(&name)
}

/// A whole source file declaring the empty namespace `name`.
pub fn namespace_file(name: &str) -> String {
    format!(
        "import Hexicon\n\nextension {} {{\n\n    class {}: {} {{\n\n    }}\n\n}}\n",
        ROOT_NAMESPACE, name, NAMESPACE_MARKER
    )
}
