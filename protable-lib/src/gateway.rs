//! The caller-supplied data source.

use std::future::Future;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::FetchError;
use crate::query::ColumnFilters;
use crate::query::Criteria;
use crate::query::PageInfo;
use crate::query::Sorter;

/// Everything a data source needs to produce one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Search criteria from the filter panel, if any were applied.
    pub filters: Option<Criteria>,
    /// Column sort; empty when unsorted.
    pub sorter: Sorter,
    /// Requested page.
    pub pagination: PageInfo,
    /// Per-column filter chips.
    pub column_filters: ColumnFilters,
}

/// One page of rows plus the total row count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    /// Total number of rows matching the request.
    pub total: u64,
    /// Rows of the requested page.
    pub data: Vec<T>,
}

impl<T> FetchResult<T> {
    /// Creates a new fetch result.
    pub fn new(total: u64, data: Vec<T>) -> Self {
        Self { total, data }
    }

    /// Creates an empty result.
    pub fn empty() -> Self {
        Self {
            total: 0,
            data: Vec::new(),
        }
    }
}

/// An asynchronous, possibly failing source of table pages.
///
/// The controller is the only caller. Calls may overlap; the controller
/// keeps only the result of the most recently dispatched request.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use protable_lib::error::FetchError;
/// use protable_lib::gateway::{FetchGateway, FetchRequest, FetchResult};
///
/// struct Numbers;
///
/// #[async_trait]
/// impl FetchGateway for Numbers {
///     type Row = u64;
///
///     async fn fetch(&self, request: FetchRequest) -> Result<FetchResult<u64>, FetchError> {
///         let start = request.pagination.offset();
///         let rows = (start..start + request.pagination.page_size()).collect();
///         Ok(FetchResult::new(1_000, rows))
///     }
/// }
/// ```
#[async_trait]
pub trait FetchGateway: Send + Sync + 'static {
    /// Row type of the table.
    type Row: Clone + Send + Sync + 'static;

    /// Fetches the page described by `request`.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult<Self::Row>, FetchError>;
}

/// Gateway backed by an async closure. See [`gateway_fn`].
pub struct FnGateway<F> {
    f: F,
}

/// Wraps an async closure as a [`FetchGateway`].
///
/// ```
/// use protable_lib::gateway::{gateway_fn, FetchResult};
///
/// let gateway = gateway_fn(|_request| async {
///     Ok(FetchResult::<String>::new(0, Vec::new()))
/// });
/// # let _ = gateway;
/// ```
pub fn gateway_fn<F, Fut, T>(f: F) -> FnGateway<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResult<T>, FetchError>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    FnGateway { f }
}

#[async_trait]
impl<F, Fut, T> FetchGateway for FnGateway<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchResult<T>, FetchError>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Row = T;

    async fn fetch(&self, request: FetchRequest) -> Result<FetchResult<T>, FetchError> {
        (self.f)(request).await
    }
}
