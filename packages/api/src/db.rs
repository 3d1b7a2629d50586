// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the catalog storage layers

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use pizzeria_pizzas::PizzaStorage;
use pizzeria_storage::{init_in_memory, init_pool, StorageConfig, StorageError};
use pizzeria_toppings::ToppingStorage;

/// Shared database state for request handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub topping_storage: Arc<ToppingStorage>,
    pub pizza_storage: Arc<PizzaStorage>,
}

impl DbState {
    /// Create new database state from a migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let topping_storage = Arc::new(ToppingStorage::new(pool.clone()));
        let pizza_storage = Arc::new(PizzaStorage::new(pool.clone()));

        Self {
            pool,
            topping_storage,
            pizza_storage,
        }
    }

    /// Open the configured database file, applying migrations
    pub async fn init(config: &StorageConfig) -> Result<Self, StorageError> {
        let pool = init_pool(config).await?;
        info!(
            "Database state initialized at {}",
            config.database_path.display()
        );
        Ok(Self::new(pool))
    }

    /// Fresh in-memory database, used by tests
    pub async fn init_in_memory() -> Result<Self, StorageError> {
        let pool = init_in_memory().await?;
        Ok(Self::new(pool))
    }
}
