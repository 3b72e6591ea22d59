//! Resource tables: reading, naming and rendering `.strings` files.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{resources::parser::parse_strings, symbols::EMPTY_COMMENT},
    error::HexiconError,
};

pub const STRINGS_EXTENSION: &str = "strings";
pub const LOCALIZATION_DIR_EXTENSION: &str = "lproj";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub key: String,
    pub value: String,
    /// Full comment text including the `/*` `*/` delimiters.
    pub comment: String,
}

impl ResourceRecord {
    pub fn has_empty_comment(&self) -> bool {
        self.comment == EMPTY_COMMENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    pub path: PathBuf,
    /// File name up to the first `.`; the join key between table sets.
    pub name: String,
    pub records: BTreeMap<String, ResourceRecord>,
}

impl ResourceTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: table_name(&path),
            path,
            records: BTreeMap::new(),
        }
    }

    /// Read and parse a table. A repeated key keeps its last record.
    pub fn read(path: &Path) -> Result<Self, HexiconError> {
        let bytes = fs::read(path)
            .map_err(|source| HexiconError::io(format!("reading {}", path.display()), source))?;
        let text = decode_text(&bytes).ok_or_else(|| {
            HexiconError::invalid_arguments(format!("{} is not valid text", path.display()))
        })?;
        let records = parse_strings(&text).map_err(|err| HexiconError::MalformedResourceFile {
            path: path.to_path_buf(),
            cause: err.cause,
            line: err.line,
            encountered: err.encountered.into_iter().map(|r| r.key).collect(),
        })?;
        let mut table = Self::new(path);
        for record in records {
            table.records.insert(record.key.clone(), record);
        }
        Ok(table)
    }

    /// Render sorted by key. With `strip_empty_comments` the sentinel comment
    /// is left out.
    pub fn render(&self, strip_empty_comments: bool) -> String {
        let mut out = String::new();
        for record in self.records.values() {
            if !(strip_empty_comments && record.has_empty_comment()) {
                out.push_str(&record.comment);
                out.push('\n');
            }
            out.push_str(&format!("\"{}\" = \"{}\";\n\n", record.key, record.value));
        }
        out
    }

    /// Language of a table stored in a `<language>.lproj` directory.
    pub fn language(&self) -> Option<&str> {
        let parent = self.path.parent()?;
        if parent.extension()? != LOCALIZATION_DIR_EXTENSION {
            return None;
        }
        parent.file_stem()?.to_str()
    }
}

/// Table name of a path: its file name up to the first `.`.
pub fn table_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((name, _)) => name.to_string(),
        None => file_name.to_string(),
    }
}

/// Decode table bytes, honouring UTF-16 and UTF-8 byte-order marks.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
