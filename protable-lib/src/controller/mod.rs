//! The data-table controller and its action handle.

mod handle;
mod sequencer;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

pub use handle::ActionHandle;
use sequencer::Generation;
use sequencer::Sequencer;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::error::FetchError;
use crate::gateway::FetchGateway;
use crate::gateway::FetchRequest;
use crate::gateway::FetchResult;
use crate::panel::FilterForm;
use crate::panel::FilterHandle;
use crate::panel::FilterPanelProps;
use crate::query::ColumnFilters;
use crate::query::Criteria;
use crate::query::PageInfo;
use crate::query::PaginationConfig;
use crate::query::QueryState;
use crate::query::Sorter;
use crate::view::TableChange;
use crate::view::TableViewProps;
use crate::wakeup;
use crate::wakeup::WakeupReceiver;
use crate::wakeup::WakeupSender;

/// Owns the query state of one mounted table and sequences its fetches.
///
/// Every operation updates the [`QueryState`] synchronously, marks it as
/// loading and then dispatches a fetch in a background task. Only the most
/// recently dispatched fetch may write rows and total back; results and
/// failures of superseded fetches are dropped.
///
/// Dropping the controller tears it down.
///
/// # Example
///
/// ```ignore
/// let controller = DataTableController::mount(gateway, ControllerConfig::default());
/// let handle = controller.action_handle();
///
/// controller.search(Some(criteria))?;
///
/// // Elsewhere: a row was deleted through another screen.
/// handle.del_refresh()?;
/// ```
pub struct DataTableController<G: FetchGateway> {
    inner: Arc<Inner<G>>,
    handle: ActionHandle<G>,
}

impl<G: FetchGateway> DataTableController<G> {
    /// Mounts a controller and schedules the first fetch.
    ///
    /// The first fetch waits for the configured debounce delay; any
    /// operation issued meanwhile supersedes it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(gateway: G, config: ControllerConfig) -> Self {
        let filter_form = if config.filter_panel.fields.is_empty() {
            None
        } else {
            Some(FilterForm::new(config.filter_panel.fields.clone()))
        };

        let inner = Arc::new(Inner {
            gateway: Arc::new(gateway),
            state: Mutex::new(QueryState::new(
                config.initial_filters.clone(),
                config.page_size,
            )),
            sequencer: Sequencer::new(),
            filter_form,
            subscribers: Mutex::new(Vec::new()),
            cancel: CancellationToken::new(),
            config,
        });

        log::debug!(
            "Mounting table controller (page size {}, debounce {:?})",
            inner.config.page_size,
            inner.config.debounce
        );
        // A fresh controller cannot be torn down yet.
        let _ = inner.dispatch("mount", inner.config.debounce, |_| {});

        let handle = ActionHandle::new(Arc::downgrade(&inner));
        Self { inner, handle }
    }

    /// Returns the action handle.
    ///
    /// Every call returns a clone of the same handle.
    pub fn action_handle(&self) -> ActionHandle<G> {
        self.handle.clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> WakeupReceiver {
        let (tx, rx) = wakeup::channel();
        if !self.inner.is_torn_down()
            && let Ok(mut subscribers) = self.inner.subscribers.lock()
        {
            subscribers.push(tx);
        }
        rx
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Applies search criteria and fetches page 1.
    pub fn search(&self, filters: Option<Criteria>) -> Result<(), ControllerError> {
        self.inner.search(filters)
    }

    /// Applies reset criteria (usually `None`) and fetches page 1.
    pub fn reset(&self, filters: Option<Criteria>) -> Result<(), ControllerError> {
        self.inner
            .dispatch("reset", Duration::ZERO, |state| state.search(filters))
    }

    /// Applies a page, column-filter or sort change from the table view.
    pub fn change_view(
        &self,
        pagination: PageInfo,
        column_filters: ColumnFilters,
        sorter: Sorter,
    ) -> Result<(), ControllerError> {
        let threshold = self.inner.config.display_threshold;
        self.inner.dispatch("change_view", Duration::ZERO, |state| {
            state.change_view(pagination, column_filters, sorter, threshold)
        })
    }

    /// Forwards a table view change event to [`change_view`](Self::change_view).
    pub fn on_table_change(&self, change: TableChange) -> Result<(), ControllerError> {
        self.change_view(change.pagination, change.column_filters, change.sorter)
    }

    /// Re-fetches, optionally at another page.
    pub fn refresh(&self, page_info: Option<PageInfo>) -> Result<(), ControllerError> {
        self.inner.refresh(page_info)
    }

    /// Re-fetches from page 1 after a row was added elsewhere.
    pub fn added_refresh(&self) -> Result<(), ControllerError> {
        self.inner.added_refresh()
    }

    /// Re-fetches after exactly one row was removed elsewhere.
    ///
    /// Steps back a page when the removed row was the only one on the
    /// current page, so the table never shows an empty trailing page.
    pub fn removed_refresh(&self) -> Result<(), ControllerError> {
        self.inner.removed_refresh()
    }

    /// Searches with the filter panel's current values.
    ///
    /// Without a filter panel the search has no criteria.
    pub fn submit_filters(&self) -> Result<(), ControllerError> {
        let values = self.inner.filter_form.as_ref().map(|form| form.values());
        self.search(values)
    }

    /// Restores the filter panel's fields and resets with their values.
    pub fn reset_filters(&self) -> Result<(), ControllerError> {
        let values = self.inner.filter_form.as_ref().map(|form| {
            form.reset_fields();
            form.values()
        });
        self.reset(values)
    }

    /// Tears the controller down.
    ///
    /// Pending fetches are abandoned and never touch the state again; later
    /// operations fail with [`ControllerError::TornDown`]. Idempotent.
    pub fn teardown(&self) {
        self.inner.teardown();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the current page cursor.
    pub fn page_info(&self) -> PageInfo {
        self.inner.lock_state().page_info()
    }

    /// Returns the last applied search criteria.
    pub fn filters_snapshot(&self) -> Option<Criteria> {
        self.inner.lock_state().filters().cloned()
    }

    /// Returns a copy of the full query state.
    pub fn snapshot(&self) -> QueryState<G::Row> {
        self.inner.lock_state().clone()
    }

    /// Returns the pagination props, or `None` when no pagination control
    /// should be shown.
    pub fn pagination_config(&self) -> Option<PaginationConfig> {
        self.inner.pagination_config()
    }

    /// Returns the filter panel's field handle, or `None` without a panel.
    pub fn filter_handle(&self) -> Option<Arc<dyn FilterHandle>> {
        self.inner.filter_handle()
    }

    /// Returns the filter panel props, or `None` when the panel has no
    /// fields and must not be rendered.
    pub fn filter_panel_props(&self) -> Option<FilterPanelProps> {
        let form = self.inner.filter_form.as_ref()?;
        let panel = &self.inner.config.filter_panel;
        Some(FilterPanelProps {
            fields: form.fields().to_vec(),
            loading: self.inner.lock_state().is_loading(),
            search_text: panel.search_text.clone(),
            reset_text: panel.reset_text.clone(),
            show_buttons: panel.show_buttons,
            class_name: panel.class_name.clone(),
        })
    }

    /// Returns the table view props.
    pub fn table_view_props(&self) -> TableViewProps<G::Row> {
        let state = self.inner.lock_state();
        TableViewProps {
            rows: state.rows().to_vec(),
            loading: state.is_loading(),
            pagination: state.pagination_config(self.inner.config.display_threshold),
        }
    }

    /// Returns `true` once the controller was torn down.
    pub fn is_torn_down(&self) -> bool {
        self.inner.is_torn_down()
    }
}

impl<G: FetchGateway> Drop for DataTableController<G> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

/// Shared controller state. Fetch tasks and the action handle reach the
/// controller through this.
struct Inner<G: FetchGateway> {
    gateway: Arc<G>,
    config: ControllerConfig,
    state: Mutex<QueryState<G::Row>>,
    sequencer: Sequencer,
    filter_form: Option<Arc<FilterForm>>,
    subscribers: Mutex<Vec<WakeupSender>>,
    cancel: CancellationToken,
}

impl<G: FetchGateway> Inner<G> {
    fn lock_state(&self) -> MutexGuard<'_, QueryState<G::Row>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn notify(&self) {
        if let Ok(subscribers) = self.subscribers.lock() {
            for subscriber in subscribers.iter() {
                subscriber.send();
            }
        }
    }

    fn teardown(&self) {
        if self.is_torn_down() {
            return;
        }
        log::debug!("Tearing down table controller");
        {
            // Cancel under the state lock: a fetch that is committing finishes
            // first, and any later commit sees the cancellation.
            let _state = self.lock_state();
            self.cancel.cancel();
        }
        // Dropping the senders ends every subscriber's `changed()` loop.
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.clear();
        }
    }

    fn pagination_config(&self) -> Option<PaginationConfig> {
        self.lock_state()
            .pagination_config(self.config.display_threshold)
    }

    fn filter_handle(&self) -> Option<Arc<dyn FilterHandle>> {
        self.filter_form
            .as_ref()
            .map(|form| Arc::clone(form) as Arc<dyn FilterHandle>)
    }

    fn search(self: &Arc<Self>, filters: Option<Criteria>) -> Result<(), ControllerError> {
        self.dispatch("search", Duration::ZERO, |state| state.search(filters))
    }

    fn refresh(self: &Arc<Self>, page_info: Option<PageInfo>) -> Result<(), ControllerError> {
        self.dispatch("refresh", Duration::ZERO, |state| state.refresh(page_info))
    }

    fn added_refresh(self: &Arc<Self>) -> Result<(), ControllerError> {
        self.dispatch("added_refresh", Duration::ZERO, |state| state.added())
    }

    fn removed_refresh(self: &Arc<Self>) -> Result<(), ControllerError> {
        self.dispatch("removed_refresh", Duration::ZERO, |state| {
            if state.removed() {
                log::debug!(
                    "Removed the last row on its page, stepping back to page {}",
                    state.page_info().page()
                );
            }
        })
    }

    /// Applies a transition and dispatches a fetch for the resulting state.
    ///
    /// The transition, the loading flag and the new generation are all set
    /// under one lock, so generations follow the order in which transitions
    /// were applied.
    fn dispatch<F>(
        self: &Arc<Self>,
        operation: &'static str,
        delay: Duration,
        transition: F,
    ) -> Result<(), ControllerError>
    where
        F: FnOnce(&mut QueryState<G::Row>),
    {
        if self.is_torn_down() {
            log::warn!("Ignoring {} on a torn down table controller", operation);
            return Err(ControllerError::TornDown);
        }

        let (generation, request) = {
            let mut state = self.lock_state();
            // Teardown cancels under this lock, so nothing mutates after it.
            if self.is_torn_down() {
                return Err(ControllerError::TornDown);
            }
            transition(&mut state);
            state.begin_fetch();
            let request = FetchRequest {
                filters: state.filters().cloned(),
                sorter: state.sorter().clone(),
                pagination: state.page_info(),
                column_filters: state.column_filters().clone(),
            };
            (self.sequencer.advance(), request)
        };

        log::debug!(
            "{}: dispatching fetch {} for page {} (size {})",
            operation,
            generation,
            request.pagination.page(),
            request.pagination.page_size()
        );
        self.notify();

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            inner.run_fetch(generation, request, delay).await;
        });
        Ok(())
    }

    async fn run_fetch(&self, generation: Generation, request: FetchRequest, delay: Duration) {
        if !delay.is_zero() {
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            if !self.sequencer.is_current(generation) {
                log::debug!("Fetch {} superseded during debounce, skipping", generation);
                return;
            }
        }

        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                log::debug!("Fetch {} abandoned on teardown", generation);
                return;
            }
            result = AssertUnwindSafe(self.gateway.fetch(request)).catch_unwind() => {
                result.unwrap_or_else(|panic| Err(FetchError::gateway(panic_message(&*panic))))
            }
        };
        self.complete(generation, result);
    }

    fn complete(&self, generation: Generation, result: Result<FetchResult<G::Row>, FetchError>) {
        let failure = {
            let mut state = self.lock_state();
            if self.is_torn_down() {
                return;
            }
            if !self.sequencer.is_current(generation) {
                log::debug!(
                    "Discarding {} of superseded fetch {}",
                    if result.is_ok() { "result" } else { "failure" },
                    generation
                );
                return;
            }
            match result {
                Ok(page) => {
                    log::debug!(
                        "Committing fetch {}: {} rows of {}",
                        generation,
                        page.data.len(),
                        page.total
                    );
                    state.commit(page.total, page.data);
                    None
                }
                Err(err) => {
                    state.fail();
                    Some(err)
                }
            }
        };
        self.notify();

        // Outside the lock: the handler may call back into the controller.
        if let Some(err) = failure {
            log::warn!("Fetch {} failed: {}", generation, err);
            if self.is_torn_down() {
                return;
            }
            if let Some(on_error) = &self.config.on_error {
                on_error(&err);
            }
        }
    }
}

/// Describes a panic raised inside a gateway call.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    format!("Gateway panicked: {}", detail)
}
