//! Custom Axum extractors.

mod pagination;
mod query;
mod validated;

pub use pagination::*;
pub use query::*;
pub use validated::*;
