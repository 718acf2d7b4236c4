pub mod index;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatasetKind;
use crate::ingest::{RawRow, RawTable};
use crate::schema::{
    normalize_analytics_row, normalize_search_row, CanonicalPageMetrics, CanonicalPagePosition,
};

pub use index::DatasetIndex;

/// Per-dataset row accounting, reported alongside the result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetStats {
    pub rows: usize,
    pub skipped_rows: usize,
    pub unresolved_rows: usize,
    pub pages: usize,
}

/// The four path-keyed lookups one analysis run joins.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndexes {
    pub ga_before: DatasetIndex<CanonicalPageMetrics>,
    pub ga_after: DatasetIndex<CanonicalPageMetrics>,
    pub sc_before: DatasetIndex<CanonicalPagePosition>,
    pub sc_after: DatasetIndex<CanonicalPagePosition>,
    pub has_position_data: bool,
}

impl DatasetIndexes {
    /// SC tables are only used as a pair; a lone SC table is ignored.
    pub fn build(
        ga_before: &RawTable,
        ga_after: &RawTable,
        search: Option<(&RawTable, &RawTable)>,
    ) -> Self {
        let (sc_before, sc_after) = match search {
            Some((before, after)) => (
                build_search_index(DatasetKind::ScBefore, before),
                build_search_index(DatasetKind::ScAfter, after),
            ),
            None => (DatasetIndex::default(), DatasetIndex::default()),
        };
        Self {
            ga_before: build_analytics_index(DatasetKind::GaBefore, ga_before),
            ga_after: build_analytics_index(DatasetKind::GaAfter, ga_after),
            sc_before,
            sc_after,
            has_position_data: search.is_some(),
        }
    }
}

pub fn build_analytics_index(
    kind: DatasetKind,
    table: &RawTable,
) -> DatasetIndex<CanonicalPageMetrics> {
    build_index(kind, table, normalize_analytics_row)
}

pub fn build_search_index(
    kind: DatasetKind,
    table: &RawTable,
) -> DatasetIndex<CanonicalPagePosition> {
    build_index(kind, table, normalize_search_row)
}

fn build_index<T>(
    kind: DatasetKind,
    table: &RawTable,
    normalize: fn(&RawRow) -> Option<(String, T)>,
) -> DatasetIndex<T> {
    let mut index = DatasetIndex::new();
    let mut unresolved_rows = 0usize;
    for row in &table.rows {
        match normalize(row) {
            Some((path, value)) => index.insert(path, value),
            None => unresolved_rows += 1,
        }
    }
    index.stats = DatasetStats {
        rows: table.len(),
        skipped_rows: table.skipped_rows,
        unresolved_rows,
        pages: index.len(),
    };
    debug!(
        dataset = kind.as_slug(),
        rows = table.len(),
        skipped = table.skipped_rows,
        unresolved = unresolved_rows,
        pages = index.len(),
        "indexed dataset"
    );
    index
}
