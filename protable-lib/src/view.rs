//! Table view contract.

use crate::query::ColumnFilters;
use crate::query::PageInfo;
use crate::query::PaginationConfig;
use crate::query::Sorter;

/// Props the table view renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewProps<T> {
    /// Rows of the current page.
    pub rows: Vec<T>,
    /// `true` while a fetch is in flight.
    pub loading: bool,
    /// Pagination control props; `None` renders no pagination control.
    pub pagination: Option<PaginationConfig>,
}

/// A user change in the table view: page, page size, column filter or sort.
#[derive(Debug, Clone, PartialEq)]
pub struct TableChange {
    /// Page cursor the user navigated to.
    pub pagination: PageInfo,
    /// Column filters after the change.
    pub column_filters: ColumnFilters,
    /// Sort after the change.
    pub sorter: Sorter,
}

impl TableChange {
    /// Creates a change event.
    pub fn new(pagination: PageInfo, column_filters: ColumnFilters, sorter: Sorter) -> Self {
        Self {
            pagination,
            column_filters,
            sorter,
        }
    }
}
