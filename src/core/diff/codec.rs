//! Text interchange format for [`Diff`].
//!
//! ```text
//! @@ Sources/Strings.swift
//! @@ Localized.Strings.Settings
//! ++ title
//! ++ greet(name:)
//! -- legacy
//! -- count(2)
//! ====
//! @@ ...
//! == Skipped ==
//! ** Localized.Strings.Missing.title
//! ```

use std::path::PathBuf;

use thiserror::Error;

use super::{Changeset, Diff};
use crate::core::symbols::FunctionSymbol;

const METADATA: &str = "@@";
const ADDITION: &str = "++";
const DELETION: &str = "--";
const SKIPPED_ENTRY: &str = "**";
const CHANGESET_SEPARATOR: &str = "====";
const SKIPPED_HEADER: &str = "== Skipped ==";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffDecodeError {
    #[error("changeset {index} has {found} line(s); expected a file, a namespace and at least one change")]
    TooFewLines { index: usize, found: usize },
    #[error("changeset {index}: invalid metadata line `{line}`")]
    InvalidMetadata { index: usize, line: String },
    #[error("changeset {index}: unexpected line `{line}`")]
    UnexpectedLine { index: usize, line: String },
    #[error("invalid skipped entry `{line}`")]
    InvalidSkippedEntry { line: String },
}

/// Encode a diff. Output is deterministic and has no trailing newline.
pub fn encode(diff: &Diff) -> String {
    let changes = diff
        .changes
        .iter()
        .map(encode_changeset)
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", CHANGESET_SEPARATOR));
    if diff.skipped.is_empty() {
        return changes;
    }
    let skipped = diff
        .skipped
        .iter()
        .map(|reference| format!("{} {}", SKIPPED_ENTRY, reference))
        .collect::<Vec<_>>()
        .join("\n");
    if changes.is_empty() {
        format!("{}\n{}", SKIPPED_HEADER, skipped)
    } else {
        format!("{}\n{}\n{}", changes, SKIPPED_HEADER, skipped)
    }
}

fn encode_changeset(changeset: &Changeset) -> String {
    let mut lines = vec![
        format!("{} {}", METADATA, changeset.origin.display()),
        format!("{} {}", METADATA, changeset.namespace),
    ];
    lines.extend(
        changeset
            .added_properties
            .iter()
            .map(|p| format!("{} {}", ADDITION, p)),
    );
    lines.extend(
        changeset
            .added_functions
            .iter()
            .map(|f| format!("{} {}", ADDITION, f)),
    );
    lines.extend(
        changeset
            .deleted_properties
            .iter()
            .map(|p| format!("{} {}", DELETION, p)),
    );
    lines.extend(
        changeset
            .deleted_functions
            .iter()
            .map(|f| format!("{} {}", DELETION, f)),
    );
    lines.join("\n")
}

/// Decode a diff.
///
/// Blank input decodes to an empty diff. Any malformed changeset or skipped
/// entry fails the whole decode.
pub fn decode(text: &str) -> Result<Diff, DiffDecodeError> {
    let lines: Vec<&str> = text.trim_end().lines().map(str::trim_end).collect();
    if lines.iter().all(|line| line.is_empty()) {
        return Ok(Diff::default());
    }

    let (change_lines, skipped_lines) = match lines.iter().position(|l| *l == SKIPPED_HEADER) {
        Some(header) => (&lines[..header], &lines[header + 1..]),
        None => (&lines[..], &[][..]),
    };

    let mut changes = Vec::new();
    if !change_lines.is_empty() {
        for (index, block) in change_lines
            .split(|line| *line == CHANGESET_SEPARATOR)
            .enumerate()
        {
            changes.push(decode_changeset(index + 1, block)?);
        }
    }

    let skipped = skipped_lines
        .iter()
        .map(|line| {
            line.strip_prefix(SKIPPED_ENTRY)
                .and_then(|rest| rest.strip_prefix(' '))
                .filter(|reference| !reference.is_empty())
                .map(str::to_string)
                .ok_or_else(|| DiffDecodeError::InvalidSkippedEntry {
                    line: line.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Diff { changes, skipped })
}

fn decode_changeset(index: usize, lines: &[&str]) -> Result<Changeset, DiffDecodeError> {
    let [file_line, namespace_line, entries @ ..] = lines else {
        return Err(DiffDecodeError::TooFewLines {
            index,
            found: lines.len(),
        });
    };
    if entries.is_empty() {
        return Err(DiffDecodeError::TooFewLines {
            index,
            found: lines.len(),
        });
    }
    let origin = metadata_value(index, file_line)?;
    let namespace = metadata_value(index, namespace_line)?;

    let mut added_properties = Vec::new();
    let mut added_functions = Vec::new();
    let mut deleted_properties = Vec::new();
    let mut deleted_functions = Vec::new();

    for line in entries {
        let unexpected = || DiffDecodeError::UnexpectedLine {
            index,
            line: line.to_string(),
        };
        let (marker, value) = line.split_once(' ').ok_or_else(unexpected)?;
        let (properties, functions) = match marker {
            ADDITION => (&mut added_properties, &mut added_functions),
            DELETION => (&mut deleted_properties, &mut deleted_functions),
            _ => return Err(unexpected()),
        };
        if value.contains('(') {
            let symbol: FunctionSymbol = value.parse().map_err(|_| unexpected())?;
            functions.push(symbol);
        } else if !value.is_empty() && !value.contains(char::is_whitespace) {
            properties.push(value.to_string());
        } else {
            return Err(unexpected());
        }
    }

    Ok(Changeset::new(
        PathBuf::from(origin),
        namespace,
        added_properties,
        added_functions,
        deleted_properties,
        deleted_functions,
    ))
}

fn metadata_value<'a>(index: usize, line: &'a str) -> Result<&'a str, DiffDecodeError> {
    line.strip_prefix(METADATA)
        .and_then(|rest| rest.strip_prefix(' '))
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| DiffDecodeError::InvalidMetadata {
            index,
            line: line.to_string(),
        })
}
