// ABOUTME: Topping storage layer using SQLite
// ABOUTME: Handles CRUD operations for toppings with application-level name uniqueness

use chrono::Utc;
use pizzeria_core::validate_name;
use pizzeria_storage::StorageError;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::types::{Topping, ToppingCreateInput};

pub struct ToppingStorage {
    pool: SqlitePool,
}

impl ToppingStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all toppings in creation order
    pub async fn list_toppings(&self) -> Result<Vec<Topping>, StorageError> {
        let (toppings, _) = self.list_toppings_paginated(None, None).await?;
        Ok(toppings)
    }

    /// List toppings with pagination, returning the page and the total count
    pub async fn list_toppings_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Topping>, i64), StorageError> {
        debug!("Fetching toppings (limit: {:?}, offset: {:?})", limit, offset);

        let count = self.count_toppings().await?;

        // SQLite treats a negative LIMIT as "no limit"
        let toppings = sqlx::query_as::<_, Topping>(
            "SELECT id, name, created_at, updated_at FROM toppings ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok((toppings, count))
    }

    /// Total number of toppings
    pub async fn count_toppings(&self) -> Result<i64, StorageError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM toppings")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Get a single topping by ID
    pub async fn get_topping(&self, topping_id: i64) -> Result<Topping, StorageError> {
        debug!("Fetching topping: {}", topping_id);

        sqlx::query_as::<_, Topping>(
            "SELECT id, name, created_at, updated_at FROM toppings WHERE id = ?",
        )
        .bind(topping_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?
        .ok_or(StorageError::NotFound)
    }

    /// Get a topping by its exact name
    pub async fn get_topping_by_name(&self, name: &str) -> Result<Option<Topping>, StorageError> {
        debug!("Fetching topping by name: {}", name);

        sqlx::query_as::<_, Topping>(
            "SELECT id, name, created_at, updated_at FROM toppings WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)
    }

    /// Resolve topping names, as submitted in pizza forms, to ids in the same order
    pub async fn resolve_topping_names(&self, names: &[String]) -> Result<Vec<i64>, StorageError> {
        let mut topping_ids = Vec::with_capacity(names.len());

        for name in names {
            topping_ids.push(self.resolve_topping_name(name).await?);
        }

        Ok(topping_ids)
    }

    /// Id of the topping with exactly this name
    pub async fn resolve_topping_name(&self, name: &str) -> Result<i64, StorageError> {
        self.get_topping_by_name(name)
            .await?
            .map(|topping| topping.id)
            .ok_or_else(|| StorageError::UnknownTopping(name.to_string()))
    }

    /// Create a new topping
    pub async fn create_topping(&self, input: ToppingCreateInput) -> Result<Topping, StorageError> {
        validate_name(&input.name)?;

        debug!("Creating topping (name: {})", input.name);

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        if name_taken(&mut *tx, &input.name).await? {
            return Err(StorageError::DuplicateName(input.name));
        }

        let topping_id = sqlx::query(
            r#"
            INSERT INTO toppings (name, created_at, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?
        .last_insert_rowid();

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_topping(topping_id).await
    }

    /// Rename a topping. Renaming to the topping's current name is a duplicate.
    pub async fn rename_topping(
        &self,
        topping_id: i64,
        new_name: &str,
    ) -> Result<Topping, StorageError> {
        validate_name(new_name)?;

        debug!("Renaming topping {} to {}", topping_id, new_name);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM toppings WHERE id = ?)")
            .bind(topping_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        if !exists {
            return Err(StorageError::NotFound);
        }

        if name_taken(&mut *tx, new_name).await? {
            return Err(StorageError::DuplicateName(new_name.to_string()));
        }

        sqlx::query("UPDATE toppings SET name = ?, updated_at = ? WHERE id = ?")
            .bind(new_name)
            .bind(Utc::now())
            .bind(topping_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_topping(topping_id).await
    }

    /// Delete a topping permanently; pizzas using it lose it
    pub async fn delete_topping(&self, topping_id: i64) -> Result<(), StorageError> {
        debug!("Deleting topping: {}", topping_id);

        let result = sqlx::query("DELETE FROM toppings WHERE id = ?")
            .bind(topping_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Exact, case-sensitive match against every existing topping name
async fn name_taken(conn: &mut SqliteConnection, name: &str) -> Result<bool, StorageError> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM toppings WHERE name = ?)")
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(StorageError::Sqlx)
}
