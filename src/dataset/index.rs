use std::collections::HashMap;

use crate::dataset::DatasetStats;

/// Path-keyed lookup that remembers first-insertion order.
///
/// Re-inserting a path replaces its value but keeps its original position,
/// which fixes the join order used to break ties when sorting pages.
#[derive(Debug, Clone)]
pub struct DatasetIndex<T> {
    order: Vec<String>,
    entries: HashMap<String, T>,
    pub stats: DatasetStats,
}

impl<T> DatasetIndex<T> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            stats: DatasetStats::default(),
        }
    }

    pub fn insert(&mut self, path: String, value: T) {
        if !self.entries.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.entries.insert(path, value);
    }

    pub fn get(&self, path: &str) -> Option<&T> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Paths in first-insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<T: Copy + Default> DatasetIndex<T> {
    /// Value for `path`, or the zero default when the page is absent.
    pub fn get_or_default(&self, path: &str) -> T {
        self.get(path).copied().unwrap_or_default()
    }
}

impl<T> Default for DatasetIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetIndex;

    #[test]
    fn reinsert_keeps_first_position() {
        let mut index = DatasetIndex::new();
        index.insert("/a".to_string(), 1u32);
        index.insert("/b".to_string(), 2);
        index.insert("/a".to_string(), 3);
        assert_eq!(index.paths().collect::<Vec<_>>(), vec!["/a", "/b"]);
        assert_eq!(index.get("/a"), Some(&3));
        assert_eq!(index.get_or_default("/missing"), 0);
    }
}
