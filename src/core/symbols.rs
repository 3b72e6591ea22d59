//! Symbol vocabulary shared by extraction, diffing and synthesis.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

/// Qualified name of the container every namespace extends.
pub const ROOT_NAMESPACE: &str = "Localized.Strings";

/// Type a namespace class must inherit from.
pub const NAMESPACE_MARKER: &str = "LocalizationNamespace";

pub const STRING_TYPE: &str = "String";

/// Comment written by the extraction tool when an engineer left none.
pub const EMPTY_COMMENT: &str = "/* No comment provided by engineer. */";

pub const DEFAULT_TABLE_NAME: &str = "Localizable";

static SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((?:(?P<count>\d+)|(?P<labels>(?:[A-Za-z_][A-Za-z0-9_]*:)+))?\)$").unwrap()
});

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Parameter signature of a function symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArgumentShape {
    Empty,
    Unlabeled(usize),
    Labeled(Vec<String>),
}

impl ArgumentShape {
    /// Shape of an argument list given each argument's label.
    ///
    /// Returns `None` when labeled and unlabeled arguments are mixed.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let labels: Vec<Option<S>> = labels.into_iter().collect();
        let Some(first) = labels.first() else {
            return Some(ArgumentShape::Empty);
        };
        if first.is_some() {
            labels
                .into_iter()
                .map(|label| label.map(Into::into))
                .collect::<Option<Vec<String>>>()
                .map(ArgumentShape::Labeled)
        } else if labels.iter().all(Option::is_none) {
            Some(ArgumentShape::Unlabeled(labels.len()))
        } else {
            None
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            ArgumentShape::Empty => 0,
            ArgumentShape::Unlabeled(count) => *count,
            ArgumentShape::Labeled(labels) => labels.len(),
        }
    }
}

impl fmt::Display for ArgumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentShape::Empty => write!(f, "()"),
            ArgumentShape::Unlabeled(count) => write!(f, "({})", count),
            ArgumentShape::Labeled(labels) => {
                write!(f, "(")?;
                for label in labels {
                    write!(f, "{}:", label)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument shape `{0}`")]
pub struct ShapeParseError(pub String);

impl FromStr for ArgumentShape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SHAPE_RE
            .captures(s)
            .ok_or_else(|| ShapeParseError(s.to_string()))?;
        if let Some(count) = caps.name("count") {
            let count: usize = count
                .as_str()
                .parse()
                .map_err(|_| ShapeParseError(s.to_string()))?;
            return Ok(match count {
                0 => ArgumentShape::Empty,
                n => ArgumentShape::Unlabeled(n),
            });
        }
        if let Some(labels) = caps.name("labels") {
            let labels = LABEL_RE
                .find_iter(labels.as_str())
                .map(|m| m.as_str().to_string())
                .collect();
            return Ok(ArgumentShape::Labeled(labels));
        }
        Ok(ArgumentShape::Empty)
    }
}

/// A function symbol; distinct shapes of the same name are distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionSymbol {
    pub name: String,
    pub arguments: ArgumentShape,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arguments: ArgumentShape) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.arguments)
    }
}

impl FromStr for FunctionSymbol {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let open = s.find('(').ok_or_else(|| ShapeParseError(s.to_string()))?;
        let (name, shape) = s.split_at(open);
        if name.is_empty() {
            return Err(ShapeParseError(s.to_string()));
        }
        Ok(Self::new(name, shape.parse()?))
    }
}

/// Whether `path` lies strictly below `namespace`, comparing whole
/// dot-separated components.
pub fn is_below(path: &str, namespace: &str) -> bool {
    path.strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
}

/// Split `A.B.c` into `("A.B", "c")`.
pub fn split_leaf(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('.')
}

/// A leaf naming a type (nested namespace or initializer) rather than a member.
pub fn looks_like_type(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Last component of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
