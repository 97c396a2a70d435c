//! Imperative control surface for callers outside the view tree.

use std::fmt;
use std::sync::Arc;
use std::sync::Weak;

use super::Inner;
use crate::error::ControllerError;
use crate::gateway::FetchGateway;
use crate::panel::FilterHandle;
use crate::query::Criteria;
use crate::query::PageInfo;

/// Long-lived handle into a mounted [`DataTableController`](super::DataTableController).
///
/// The handle holds no data of its own: every method goes through the
/// controller's own operations and triggers a fetch. It is cheap to clone and
/// all clones point at the same controller.
///
/// Once the controller is torn down, mutating methods return
/// [`ControllerError::TornDown`] and reads return `None`.
pub struct ActionHandle<G: FetchGateway> {
    inner: Weak<Inner<G>>,
}

impl<G: FetchGateway> ActionHandle<G> {
    pub(super) fn new(inner: Weak<Inner<G>>) -> Self {
        Self { inner }
    }

    fn attached(&self) -> Result<Arc<Inner<G>>, ControllerError> {
        self.inner
            .upgrade()
            .filter(|inner| !inner.is_torn_down())
            .ok_or(ControllerError::TornDown)
    }

    /// Re-fetches after one row was removed; see
    /// [`removed_refresh`](super::DataTableController::removed_refresh).
    pub fn del_refresh(&self) -> Result<(), ControllerError> {
        self.attached()?.removed_refresh()
    }

    /// Re-fetches from page 1 after a row was added.
    pub fn add_refresh(&self) -> Result<(), ControllerError> {
        self.attached()?.added_refresh()
    }

    /// Re-fetches, optionally at another page.
    pub fn refresh(&self, page_info: Option<PageInfo>) -> Result<(), ControllerError> {
        self.attached()?.refresh(page_info)
    }

    /// Searches with the given criteria from page 1.
    pub fn search_with_filters(&self, filters: Option<Criteria>) -> Result<(), ControllerError> {
        self.attached()?.search(filters)
    }

    /// Returns the filter panel's field handle, or `None` without a panel.
    pub fn filter_handle(&self) -> Option<Arc<dyn FilterHandle>> {
        self.attached().ok()?.filter_handle()
    }

    /// Returns the current page cursor.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.attached().ok().map(|inner| inner.lock_state().page_info())
    }

    /// Returns `true` while the controller is mounted.
    pub fn is_attached(&self) -> bool {
        self.attached().is_ok()
    }

    /// Returns `true` if both handles belong to the same controller.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl<G: FetchGateway> Clone for ActionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<G: FetchGateway> fmt::Debug for ActionHandle<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}
