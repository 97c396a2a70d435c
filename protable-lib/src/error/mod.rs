//! Error types

mod controller;
mod fetch;

pub use controller::*;
pub use fetch::*;
