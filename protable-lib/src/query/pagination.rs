//! Page cursor and the pagination-visibility policy.

use serde::Serialize;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// 1-indexed page cursor.
///
/// Both fields are always at least 1. Constructors clamp lower values
/// instead of failing, so a page cursor can never be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    page: u64,
    page_size: u64,
}

impl PageInfo {
    /// Creates a page cursor, clamping zero values to 1.
    pub fn new(page: u64, page_size: u64) -> Self {
        if page == 0 || page_size == 0 {
            log::warn!(
                "Clamping invalid page info (page: {}, page_size: {})",
                page,
                page_size
            );
        }
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Creates a cursor at the first page.
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// Returns the 1-indexed page.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the same page size at page 1.
    pub fn rewind(self) -> Self {
        Self { page: 1, ..self }
    }

    /// Returns the cursor moved to another page, clamped to 1.
    pub fn with_page(self, page: u64) -> Self {
        Self::new(page, self.page_size)
    }

    /// Returns the zero-based offset of the first row on this page.
    ///
    /// Saturates at `u64::MAX` for pages beyond any addressable row.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// When to show pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayThreshold {
    /// Always show pagination controls.
    #[default]
    Disabled,
    /// Show pagination controls only when the total row count exceeds the
    /// given number of rows.
    Above(u64),
}

impl DisplayThreshold {
    /// Returns `true` if pagination controls should be shown for `total` rows.
    pub fn shows(&self, total: u64) -> bool {
        match self {
            Self::Disabled => true,
            Self::Above(threshold) => total > *threshold,
        }
    }
}

/// Pagination props handed to the table view.
///
/// Derived from the query state on every read and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Current 1-indexed page.
    pub page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Total row count reported by the last fetch.
    pub total: u64,
}

impl PaginationConfig {
    /// Applies the visibility policy; `None` means no pagination control.
    pub fn derive(page_info: PageInfo, total: u64, threshold: DisplayThreshold) -> Option<Self> {
        threshold.shows(total).then_some(Self {
            page: page_info.page(),
            page_size: page_info.page_size(),
            total,
        })
    }

    /// Returns the number of pages needed to show `total` rows.
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.page_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_clamps() {
        let info = PageInfo::new(0, 0);
        assert_eq!(info.page(), 1);
        assert_eq!(info.page_size(), 1);
        assert_eq!(PageInfo::new(3, 20).with_page(0).page(), 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageInfo::new(1, 10).offset(), 0);
        assert_eq!(PageInfo::new(3, 10).offset(), 20);
        assert_eq!(PageInfo::new(u64::MAX, 10).offset(), u64::MAX);
    }

    #[test]
    fn test_threshold_policy() {
        let page = PageInfo::new(1, 10);
        assert_eq!(PaginationConfig::derive(page, 5, DisplayThreshold::Above(10)), None);
        assert_eq!(PaginationConfig::derive(page, 10, DisplayThreshold::Above(10)), None);
        assert_eq!(
            PaginationConfig::derive(page, 15, DisplayThreshold::Above(10)),
            Some(PaginationConfig {
                page: 1,
                page_size: 10,
                total: 15,
            })
        );
        assert!(PaginationConfig::derive(page, 0, DisplayThreshold::Disabled).is_some());
        assert!(PaginationConfig::derive(page, 1_000, DisplayThreshold::Disabled).is_some());
    }

    #[test]
    fn test_page_count() {
        let config = PaginationConfig {
            page: 1,
            page_size: 10,
            total: 21,
        };
        assert_eq!(config.page_count(), 3);
    }

    #[test]
    fn test_page_info_serde() {
        let json = serde_json::to_string(&PageInfo::new(3, 20)).unwrap();
        assert_eq!(json, r#"{"page":3,"pageSize":20}"#);
    }
}
