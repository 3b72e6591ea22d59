//! `.strings` resource tables: parsing, merging and transactional write-back.

pub mod merge;
pub mod parser;
pub mod table;
pub mod writer;

pub use merge::{MergeKind, MergeStats, MergedTable, merge_into, merge_tables};
pub use parser::{ResourceParseError, TokenError, parse_strings};
pub use table::{ResourceRecord, ResourceTable};
pub use writer::write_atomically;
