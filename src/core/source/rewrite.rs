//! Span-replacement rewriting.

use super::{SourceError, SourceFile, Span};

/// Replace the text of `span` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

impl Edit {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

impl SourceFile {
    /// Apply non-overlapping `edits` and re-parse the result.
    ///
    /// Text outside the edited spans is reproduced byte-for-byte. Fails if the
    /// edits overlap or the rewritten text no longer parses.
    pub fn rewrite(&self, mut edits: Vec<Edit>) -> Result<SourceFile, SourceError> {
        edits.sort_by_key(|edit| edit.span.start);
        let mut output = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for edit in &edits {
            if edit.span.start < cursor || edit.span.end > self.text.len() {
                return Err(SourceError::Syntax {
                    path: self.path.clone(),
                    line: self.line_of(edit.span.start.min(self.text.len())),
                    message: "overlapping rewrite".to_string(),
                });
            }
            output.push_str(&self.text[cursor..edit.span.start]);
            output.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        output.push_str(&self.text[cursor..]);
        SourceFile::parse(self.path.clone(), output)
    }

    /// Render the file back to text.
    pub fn render(&self) -> &str {
        &self.text
    }
}
