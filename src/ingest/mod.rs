pub mod delimiter;
pub mod reader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use delimiter::{detect_delimiter, Delimiter};
pub use reader::parse_table;

/// One data line keyed by lower-cased header.
pub type RawRow = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub delimiter: Option<Delimiter>,
    /// Data lines dropped for having fewer than two cells.
    pub skipped_rows: usize,
}

impl RawTable {
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            delimiter: None,
            skipped_rows: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
