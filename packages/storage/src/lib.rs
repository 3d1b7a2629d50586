// ABOUTME: Data layer and persistence for Pizzeria
// ABOUTME: SQLite pool construction, embedded migrations, and the shared storage error type

pub mod error;
pub mod pool;

pub use error::{StorageError, StorageResult};
pub use pool::{init_in_memory, init_pool, run_migrations, StorageConfig, MIGRATOR};
