//! Data-table orchestration
//!
//! Owns the query lifecycle of a single paginated table: filter criteria,
//! sort order, column filters and the page cursor. User and caller intents are
//! turned into one last-dispatch-wins sequence of asynchronous fetches against
//! a caller-supplied [`FetchGateway`](gateway::FetchGateway).

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod model;
pub mod panel;
pub mod query;
pub mod view;
pub mod wakeup;

pub use config::ControllerConfig;
pub use controller::ActionHandle;
pub use controller::DataTableController;
pub use gateway::FetchGateway;
