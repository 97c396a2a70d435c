//! Dynamic field values

mod value;

pub use value::*;
