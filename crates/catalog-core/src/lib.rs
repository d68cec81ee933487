//! # Catalog Core
//!
//! Core types, traits, and error definitions shared by every layer of the
//! music catalog: domain entities, the error taxonomy, pagination, request
//! validation and the music search filter.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod search;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use search::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
