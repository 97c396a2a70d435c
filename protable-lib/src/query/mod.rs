//! Query state: filters, sorting, column filters and pagination.

mod filters;
mod pagination;
mod sorter;
mod state;

pub use filters::*;
pub use pagination::*;
pub use sorter::*;
pub use state::*;
