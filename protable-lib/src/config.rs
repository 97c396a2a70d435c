//! Controller configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::panel::FilterPanelConfig;
use crate::query::Criteria;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::query::DisplayThreshold;

/// Callback invoked once for every failed fetch that was not superseded.
pub type ErrorHandler = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Configuration for a [`DataTableController`](crate::DataTableController).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use protable_lib::ControllerConfig;
/// use protable_lib::query::DisplayThreshold;
///
/// let config = ControllerConfig::default()
///     .with_page_size(20)
///     .with_display_threshold(DisplayThreshold::Above(20))
///     .with_debounce(Duration::from_millis(100))
///     .on_error(|err| eprintln!("fetch failed: {err}"));
/// # assert_eq!(config.page_size, 20);
/// ```
#[derive(Clone)]
pub struct ControllerConfig {
    /// When to show pagination controls.
    ///
    /// Default: always
    pub display_threshold: DisplayThreshold,

    /// Rows per page until the table view asks for another size.
    ///
    /// Default: 10
    pub page_size: u64,

    /// Delay before the first fetch after mount.
    ///
    /// Any explicit operation issued during the delay supersedes it.
    ///
    /// Default: 250 ms
    pub debounce: Duration,

    /// Criteria applied to the first fetch.
    ///
    /// Default: none
    pub initial_filters: Option<Criteria>,

    /// Filter panel fields and labels.
    pub filter_panel: FilterPanelConfig,

    /// Failure callback.
    pub on_error: Option<ErrorHandler>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            display_threshold: DisplayThreshold::Disabled,
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(250),
            initial_filters: None,
            filter_panel: FilterPanelConfig::default(),
            on_error: None,
        }
    }
}

impl ControllerConfig {
    /// Creates a new controller config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pagination display threshold.
    pub fn with_display_threshold(mut self, threshold: DisplayThreshold) -> Self {
        self.display_threshold = threshold;
        self
    }

    /// Sets the initial page size. Zero is clamped to 1.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the mount debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the criteria used for the first fetch.
    pub fn with_initial_filters(mut self, filters: Criteria) -> Self {
        self.initial_filters = Some(filters);
        self
    }

    /// Sets the filter panel configuration.
    pub fn with_filter_panel(mut self, panel: FilterPanelConfig) -> Self {
        self.filter_panel = panel;
        self
    }

    /// Sets the failure callback.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&FetchError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("display_threshold", &self.display_threshold)
            .field("page_size", &self.page_size)
            .field("debounce", &self.debounce)
            .field("initial_filters", &self.initial_filters)
            .field("filter_panel", &self.filter_panel)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
