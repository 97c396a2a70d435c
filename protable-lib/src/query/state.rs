//! The controller's authoritative query snapshot.

use super::ColumnFilters;
use super::Criteria;
use super::DisplayThreshold;
use super::PageInfo;
use super::PaginationConfig;
use super::Sorter;

/// Filters, sort, column filters, page cursor and the last fetched page.
///
/// Only the controller mutates a `QueryState`; callers receive clones
/// through [`DataTableController::snapshot`](crate::DataTableController::snapshot).
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    filters: Option<Criteria>,
    sorter: Sorter,
    column_filters: ColumnFilters,
    pagination: PageInfo,
    total: u64,
    rows: Vec<T>,
    loading: bool,
}

impl<T> QueryState<T> {
    /// Creates an empty state at page 1.
    pub fn new(filters: Option<Criteria>, page_size: u64) -> Self {
        Self {
            filters,
            sorter: Sorter::none(),
            column_filters: ColumnFilters::new(),
            pagination: PageInfo::first(page_size),
            total: 0,
            rows: Vec::new(),
            loading: false,
        }
    }

    /// Last applied search criteria.
    pub fn filters(&self) -> Option<&Criteria> {
        self.filters.as_ref()
    }

    /// Current column sort.
    pub fn sorter(&self) -> &Sorter {
        &self.sorter
    }

    /// Current per-column filters.
    pub fn column_filters(&self) -> &ColumnFilters {
        &self.column_filters
    }

    /// Current page cursor.
    pub fn page_info(&self) -> PageInfo {
        self.pagination
    }

    /// Total row count from the last committed fetch.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Rows from the last committed fetch.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// `true` while the latest dispatched fetch is unresolved.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Pagination props under the given visibility policy.
    pub fn pagination_config(&self, threshold: DisplayThreshold) -> Option<PaginationConfig> {
        PaginationConfig::derive(self.pagination, self.total, threshold)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Applies new search criteria and rewinds to page 1.
    pub(crate) fn search(&mut self, filters: Option<Criteria>) {
        self.filters = filters;
        self.pagination = self.pagination.rewind();
    }

    /// Applies a table change.
    ///
    /// A changed sorter or column filter rewinds to page 1 and ignores the
    /// page delta. Otherwise the page delta is taken only while pagination
    /// controls are visible.
    pub(crate) fn change_view(
        &mut self,
        pagination: PageInfo,
        column_filters: ColumnFilters,
        sorter: Sorter,
        threshold: DisplayThreshold,
    ) {
        if column_filters != self.column_filters || sorter != self.sorter {
            self.pagination = self.pagination.rewind();
            self.column_filters = column_filters;
            self.sorter = sorter;
        } else if self.pagination_config(threshold).is_some() {
            self.pagination = pagination;
        }
    }

    /// Applies a page override, if any.
    pub(crate) fn refresh(&mut self, page_info: Option<PageInfo>) {
        if let Some(page_info) = page_info {
            self.pagination = page_info;
        }
    }

    /// Rewinds to page 1 after a row was added elsewhere.
    pub(crate) fn added(&mut self) {
        self.pagination = self.pagination.rewind();
    }

    /// Steps back one page if the removed row was the only one on the
    /// current page. Returns `true` if the page changed.
    ///
    /// `total` still holds the count from before the removal.
    pub(crate) fn removed(&mut self) -> bool {
        let info = self.pagination;
        // `offset + 1 == total`, without overflowing the offset.
        let only_row_on_page = self.total > 0
            && (self.total - 1) % info.page_size() == 0
            && (self.total - 1) / info.page_size() == info.page() - 1;
        if info.page() > 1 && only_row_on_page {
            self.pagination = info.with_page(info.page() - 1);
            true
        } else {
            false
        }
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub(crate) fn commit(&mut self, total: u64, rows: Vec<T>) {
        self.total = total;
        self.rows = rows;
        self.loading = false;
    }

    pub(crate) fn fail(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn state_at(page: u64, page_size: u64, total: u64) -> QueryState<u32> {
        let mut state = QueryState::new(None, page_size);
        state.refresh(Some(PageInfo::new(page, page_size)));
        state.commit(total, Vec::new());
        state
    }

    #[test]
    fn test_search_rewinds() {
        let mut state = state_at(4, 10, 100);
        let mut criteria = Criteria::new();
        criteria.insert("name".to_string(), Value::from("Ada"));

        state.search(Some(criteria.clone()));

        assert_eq!(state.page_info().page(), 1);
        assert_eq!(state.page_info().page_size(), 10);
        assert_eq!(state.filters(), Some(&criteria));
    }

    #[test]
    fn test_removed_last_row_on_trailing_page() {
        let mut state = state_at(3, 10, 21);
        assert!(state.removed());
        assert_eq!(state.page_info(), PageInfo::new(2, 10));
    }

    #[test]
    fn test_removed_keeps_page_with_remaining_rows() {
        let mut state = state_at(3, 10, 25);
        assert!(!state.removed());
        assert_eq!(state.page_info(), PageInfo::new(3, 10));
    }

    #[test]
    fn test_removed_far_beyond_last_page() {
        let mut state = state_at(u64::MAX, 10, 21);
        assert!(!state.removed());
        assert_eq!(state.page_info().page(), u64::MAX);

        let mut state = state_at(u64::MAX, u64::MAX, u64::MAX);
        assert!(!state.removed());
    }

    #[test]
    fn test_removed_with_empty_total() {
        let mut state = state_at(2, 10, 0);
        assert!(!state.removed());
        assert_eq!(state.page_info().page(), 2);
    }

    #[test]
    fn test_removed_on_first_page() {
        let mut state = state_at(1, 10, 1);
        assert!(!state.removed());
        assert_eq!(state.page_info().page(), 1);
    }

    #[test]
    fn test_added_rewinds() {
        let mut state = state_at(5, 10, 100);
        state.added();
        assert_eq!(state.page_info().page(), 1);
    }

    #[test]
    fn test_change_view_sorter_rewinds_and_ignores_delta() {
        let mut state = state_at(3, 10, 100);
        state.change_view(
            PageInfo::new(4, 10),
            ColumnFilters::new(),
            Sorter::asc("name"),
            DisplayThreshold::Disabled,
        );
        assert_eq!(state.page_info().page(), 1);
        assert_eq!(state.sorter(), &Sorter::asc("name"));
    }

    #[test]
    fn test_change_view_column_filters_rewind() {
        let mut state = state_at(3, 10, 100);
        let filters = ColumnFilters::new().with("status", ["open"]);
        state.change_view(
            PageInfo::new(3, 10),
            filters.clone(),
            Sorter::none(),
            DisplayThreshold::Disabled,
        );
        assert_eq!(state.page_info().page(), 1);
        assert_eq!(state.column_filters(), &filters);
    }

    #[test]
    fn test_change_view_page_delta() {
        let mut state = state_at(1, 10, 100);
        state.change_view(
            PageInfo::new(2, 20),
            ColumnFilters::new(),
            Sorter::none(),
            DisplayThreshold::Disabled,
        );
        assert_eq!(state.page_info(), PageInfo::new(2, 20));
    }

    #[test]
    fn test_change_view_page_delta_ignored_without_pagination() {
        let mut state = state_at(1, 10, 5);
        state.change_view(
            PageInfo::new(2, 10),
            ColumnFilters::new(),
            Sorter::none(),
            DisplayThreshold::Above(10),
        );
        assert_eq!(state.page_info().page(), 1);
    }

    #[test]
    fn test_failure_keeps_last_rows() {
        let mut state: QueryState<u32> = QueryState::new(None, 10);
        state.begin_fetch();
        state.commit(2, vec![1, 2]);
        state.begin_fetch();
        state.fail();

        assert!(!state.is_loading());
        assert_eq!(state.rows(), &[1, 2]);
        assert_eq!(state.total(), 2);
    }
}
