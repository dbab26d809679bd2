//! Storage module for the API.
//!
//! Provides storage backends for PostgreSQL and in-memory operation.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::MemoryFormStore;
pub use postgres::PostgresFormStore;
pub use traits::FormStore;
