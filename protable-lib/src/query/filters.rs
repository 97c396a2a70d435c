//! Search criteria and per-column filters.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::model::Value;

/// Search criteria produced by the filter panel, keyed by field name.
pub type Criteria = BTreeMap<String, Value>;

/// Per-column filter chips driven by the table view.
///
/// Maps a column key to the set of values a row may hold in that column.
/// Kept apart from [`Criteria`]; the two never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColumnFilters {
    columns: BTreeMap<String, BTreeSet<String>>,
}

impl ColumnFilters {
    /// Creates an empty column-filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column filter allowing the given values.
    ///
    /// A column with no allowed values is dropped: an empty chip set and an
    /// absent column mean the same thing to the table view.
    pub fn with(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.set(column, values);
        self
    }

    /// Replaces the allowed values for a column.
    pub fn set(
        &mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let column = column.into();
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.columns.remove(&column);
        } else {
            self.columns.insert(column, values);
        }
    }

    /// Returns the allowed values for a column, if filtered.
    pub fn get(&self, column: &str) -> Option<&BTreeSet<String>> {
        self.columns.get(column)
    }

    /// Returns `true` if no column is filtered.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates over filtered columns in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.columns.iter()
    }
}

impl<K, V, I> FromIterator<(K, I)> for ColumnFilters
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = V>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut filters = Self::new();
        for (column, values) in iter {
            filters.set(column, values);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = ColumnFilters::new()
            .with("status", ["open", "closed"])
            .with("owner", ["ada"]);
        let b = ColumnFilters::new()
            .with("owner", ["ada"])
            .with("status", ["closed", "open"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_column_is_dropped() {
        let filters = ColumnFilters::new()
            .with("status", ["open"])
            .with("status", Vec::<String>::new());
        assert!(filters.is_empty());
        assert_eq!(filters, ColumnFilters::new());
    }

    #[test]
    fn test_from_iter() {
        let filters: ColumnFilters = [("status", vec!["open"])].into_iter().collect();
        assert!(filters.get("status").is_some_and(|v| v.contains("open")));
        assert!(filters.get("owner").is_none());
    }
}
