//! Swift source model.
//!
//! A deliberately small model of Swift source: enough structure to find
//! localization namespaces and their members, to observe where namespace
//! members are referenced, and to rewrite a namespace body in place.
//!
//! Parsing is done by tree-sitter with the Swift grammar; the concrete tree
//! is kept alongside an owned declaration view lowered from it.
//!
//! - [`lower`] / [`syntax`]: parsing and the declaration tree
//! - [`expr`]: member-access chains and calls
//! - [`visit`]: the `Visit` / `VisitWith` traversal
//! - [`rewrite`]: span edits and rendering

pub mod expr;
mod lower;
pub mod rewrite;
pub mod syntax;
pub mod visit;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tree_sitter::Tree;

pub use expr::{CallArgument, CallExpr, MemberAccess};
pub use rewrite::Edit;
pub use syntax::{
    Decl, ExtensionDecl, FunctionDecl, MemberBlock, OtherDecl, Parameter, Span, TypeDecl,
    TypeKind, VariableDecl,
};
pub use visit::{Visit, VisitFlow, VisitWith};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{}:{line}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("failed to read source file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A parse failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// A parsed Swift file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub tree: Tree,
    pub declarations: Vec<Decl>,
}

impl SourceFile {
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<Self, SourceError> {
        let path = path.into();
        let to_source_error = |err: SyntaxError| SourceError::Syntax {
            path: path.clone(),
            line: line_at(&text, err.offset),
            message: err.message,
        };
        let tree = lower::parse_tree(&text).map_err(to_source_error)?;
        let declarations = lower::lower(&tree, &text);
        Ok(Self {
            path,
            text,
            tree,
            declarations,
        })
    }

    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, text)
    }

    /// Parse every file in `paths` in parallel. The result keeps the order of
    /// `paths`; on failure, the error of the earliest failing path is returned.
    pub fn read_all(paths: &[PathBuf]) -> Result<Vec<Self>, SourceError> {
        let results: Vec<Result<Self, SourceError>> =
            paths.par_iter().map(|path| Self::read(path)).collect();
        results.into_iter().collect()
    }

    /// 1-based line number of `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        line_at(&self.text, offset)
    }

    /// Leading whitespace of the line containing `offset`.
    pub fn indentation_at(&self, offset: usize) -> &str {
        let line_start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &self.text[line_start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }
}

fn line_at(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}
