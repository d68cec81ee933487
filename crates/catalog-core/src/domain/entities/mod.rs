//! Entity types persisted by the repository layer.

mod author;
mod music;

pub use author::*;
pub use music::*;
