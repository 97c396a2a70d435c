//! Sort specification for table columns.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Current column sort of the table.
///
/// An empty sorter means the rows are unsorted. Multiple fields can be
/// chained for secondary sorting; their order matters for equality.
///
/// # Example
///
/// ```
/// use protable_lib::query::Sorter;
///
/// let sorter = Sorter::desc("created").then_asc("name");
/// assert_eq!(sorter.fields().len(), 2);
/// assert!(Sorter::none().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sorter {
    fields: Vec<(String, Direction)>,
}

impl Sorter {
    /// Creates an empty (unsorted) sorter.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending sort on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending sort on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the sorted fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Returns `true` if no sort is applied.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matters() {
        let a = Sorter::asc("name").then_desc("age");
        let b = Sorter::desc("age").then_asc("name");
        assert_ne!(a, b);
        assert_eq!(a, Sorter::asc("name").then_desc("age"));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Sorter::desc("age")).unwrap();
        assert_eq!(json, r#"[["age","desc"]]"#);
        assert_eq!(serde_json::to_string(&Sorter::none()).unwrap(), "[]");
    }
}
