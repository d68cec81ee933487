//! # Catalog Repository
//!
//! Persistence gateway for the music catalog, backed by MySQL through SQLx.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn AuthorRepository> / Arc<dyn MusicRepository>
//! MySqlAuthorRepository / MySqlMusicRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! [`InMemoryCatalog`] provides store-backed implementations of the same
//! traits with the same constraints, for running without a database.
//!
//! Schema migrations live in the workspace `migrations/` directory and are
//! embedded into the binary.

pub mod memory;
pub mod mysql;
pub mod pool;
mod sort;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
