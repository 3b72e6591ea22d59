//! Library error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{
    diff::DiffDecodeError, resources::parser::TokenError, source::SourceError,
};

#[derive(Debug, Error)]
pub enum HexiconError {
    /// Bad or missing input from the user, including a failed extraction tool run.
    #[error("{0}")]
    InvalidArguments(String),

    #[error("invalid diff: {0}")]
    InvalidDiff(#[from] DiffDecodeError),

    #[error("malformed resource file {}:{line}: {cause} (parsed {} record(s) before the error)", path.display(), encountered.len())]
    MalformedResourceFile {
        path: PathBuf,
        cause: TokenError,
        line: usize,
        /// Keys of the records parsed before the failure.
        encountered: Vec<String>,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl HexiconError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = HexiconError> = std::result::Result<T, E>;
