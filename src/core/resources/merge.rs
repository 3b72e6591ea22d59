//! Reconciling freshly extracted tables with the tables on disk.

use std::path::{Path, PathBuf};

use super::{
    table::{LOCALIZATION_DIR_EXTENSION, ResourceTable, STRINGS_EXTENSION},
    writer::write_atomically,
};
use crate::error::HexiconError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub removed: usize,
    pub comments_refreshed: usize,
}

impl MergeStats {
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Created,
    Updated,
}

/// A table after merging, ready to be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    pub table: ResourceTable,
    pub kind: MergeKind,
    pub stats: MergeStats,
}

impl MergedTable {
    pub fn path(&self) -> &Path {
        &self.table.path
    }

    pub fn write(&self, strip_empty_comments: bool) -> Result<(), HexiconError> {
        write_atomically(&self.table.path, &self.table.render(strip_empty_comments))
    }
}

/// Update `existing` against `extracted`.
///
/// Missing keys are inserted, sentinel comments are replaced by the extracted
/// comment, and keys the extracted table no longer has are pruned. Existing
/// values are never touched.
pub fn merge_into(existing: &mut ResourceTable, extracted: &ResourceTable) -> MergeStats {
    let mut stats = MergeStats::default();

    for (key, record) in &extracted.records {
        match existing.records.get_mut(key) {
            None => {
                existing.records.insert(key.clone(), record.clone());
                stats.added += 1;
            }
            Some(current) => {
                if current.has_empty_comment() && current.comment != record.comment {
                    current.comment = record.comment.clone();
                    stats.comments_refreshed += 1;
                }
            }
        }
    }

    let before = existing.records.len();
    existing
        .records
        .retain(|key, _| extracted.records.contains_key(key));
    stats.removed = before - existing.records.len();

    stats
}

/// Merge every extracted table into the existing tables sharing its name.
///
/// With a `language`, only existing tables inside `<language>.lproj` take
/// part and new tables are placed in that directory. Existing tables with no
/// extracted counterpart are left out of the result.
pub fn merge_tables(
    existing: Vec<ResourceTable>,
    extracted: &[ResourceTable],
    resources_dir: &Path,
    language: Option<&str>,
) -> Vec<MergedTable> {
    let existing: Vec<ResourceTable> = existing
        .into_iter()
        .filter(|table| language.is_none() || table.language() == language)
        .collect();

    let mut merged = Vec::new();
    for new_table in extracted {
        let mut matches = existing
            .iter()
            .filter(|table| table.name == new_table.name)
            .peekable();

        if matches.peek().is_none() {
            let mut table = new_table.clone();
            table.path = created_table_path(resources_dir, language, &new_table.name);
            merged.push(MergedTable {
                stats: MergeStats {
                    added: table.records.len(),
                    ..MergeStats::default()
                },
                table,
                kind: MergeKind::Created,
            });
            continue;
        }

        for table in matches {
            let mut table = table.clone();
            let stats = merge_into(&mut table, new_table);
            merged.push(MergedTable {
                table,
                kind: MergeKind::Updated,
                stats,
            });
        }
    }
    merged
}

fn created_table_path(resources_dir: &Path, language: Option<&str>, name: &str) -> PathBuf {
    let dir = match language {
        Some(language) => resources_dir.join(format!("{}.{}", language, LOCALIZATION_DIR_EXTENSION)),
        None => resources_dir.to_path_buf(),
    };
    dir.join(format!("{}.{}", name, STRINGS_EXTENSION))
}
