use std::collections::HashSet;

use crate::dataset::DatasetIndexes;
use crate::schema::{CanonicalPageMetrics, CanonicalPagePosition};

/// All four sides of one page, absent sides filled with zero defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPage {
    pub path: String,
    pub ga_before: CanonicalPageMetrics,
    pub ga_after: CanonicalPageMetrics,
    pub sc_before: CanonicalPagePosition,
    pub sc_after: CanonicalPagePosition,
}

impl JoinedPage {
    /// A position-before value on its own does not keep a page.
    pub fn has_signal(&self) -> bool {
        self.ga_after.sessions > 0 || self.ga_before.sessions > 0 || self.sc_after.has_data()
    }
}

/// Union of paths across all indexes, in first-seen order
/// (GA before, GA after, SC before, SC after).
pub fn union_paths(indexes: &DatasetIndexes) -> Vec<String> {
    let mut seen = HashSet::new();
    indexes
        .ga_before
        .paths()
        .chain(indexes.ga_after.paths())
        .chain(indexes.sc_before.paths())
        .chain(indexes.sc_after.paths())
        .filter(|path| seen.insert(*path))
        .map(str::to_string)
        .collect()
}

/// Joins every known path and drops pages with no retained signal.
pub fn join_pages(indexes: &DatasetIndexes) -> Vec<JoinedPage> {
    union_paths(indexes)
        .into_iter()
        .map(|path| JoinedPage {
            ga_before: indexes.ga_before.get_or_default(&path),
            ga_after: indexes.ga_after.get_or_default(&path),
            sc_before: indexes.sc_before.get_or_default(&path),
            sc_after: indexes.sc_after.get_or_default(&path),
            path,
        })
        .filter(JoinedPage::has_signal)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::dataset::DatasetIndexes;
    use crate::ingest::parse_table;

    use super::{join_pages, union_paths};

    fn indexes(ga_before: &str, ga_after: &str, sc: Option<(&str, &str)>) -> DatasetIndexes {
        let gb = parse_table(ga_before).expect("parse failed");
        let ga = parse_table(ga_after).expect("parse failed");
        let sc = sc.map(|(b, a)| {
            (
                parse_table(b).expect("parse failed"),
                parse_table(a).expect("parse failed"),
            )
        });
        DatasetIndexes::build(&gb, &ga, sc.as_ref().map(|(b, a)| (b, a)))
    }

    #[test]
    fn union_is_deduplicated_in_first_seen_order() {
        let idx = indexes(
            "page,sessions\n/b,1\n/a,2\n",
            "page,sessions\n/a,3\n/c,4\n",
            Some(("page,position\n/d,3\n", "page,position\n/b,2\n/e,1\n")),
        );
        assert_eq!(union_paths(&idx), vec!["/b", "/a", "/c", "/d", "/e"]);
    }

    #[test]
    fn absent_sides_default_to_zero() {
        let idx = indexes("page,sessions\n/a,10\n", "page,sessions\n/b,5\n", None);
        let pages = join_pages(&idx);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].path, "/a");
        assert_eq!(pages[0].ga_after.sessions, 0);
        assert_eq!(pages[1].ga_before.sessions, 0);
        assert_eq!(pages[1].sc_after.position, 0.0);
    }

    #[test]
    fn position_before_alone_is_dropped() {
        let idx = indexes(
            "page,sessions\n/a,10\n",
            "page,sessions\n/a,8\n",
            Some((
                "page,position\n/only-before,4\n/only-after,0\n",
                "page,position\n/ranked-after,6\n",
            )),
        );
        let paths: Vec<_> = join_pages(&idx).into_iter().map(|p| p.path).collect();
        assert_eq!(paths, vec!["/a", "/ranked-after"]);
    }

    #[test]
    fn zero_sessions_everywhere_is_dropped() {
        let idx = indexes("page,sessions\n/z,0\n", "page,sessions\n/z,0\n", None);
        assert!(join_pages(&idx).is_empty());
    }
}
