// ABOUTME: Pizza storage layer using SQLite
// ABOUTME: Handles pizza CRUD and topping membership edits inside transactions

use chrono::{DateTime, Utc};
use pizzeria_core::validate_name;
use pizzeria_storage::StorageError;
use pizzeria_toppings::Topping;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use crate::types::{Pizza, PizzaCreateInput};

#[derive(FromRow)]
struct PizzaRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PizzaRow {
    fn into_pizza(self, toppings: Vec<Topping>) -> Pizza {
        Pizza {
            id: self.id,
            name: self.name,
            toppings,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PizzaToppingRow {
    pizza_id: i64,
    #[sqlx(flatten)]
    topping: Topping,
}

pub struct PizzaStorage {
    pool: SqlitePool,
}

impl PizzaStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List pizzas with pagination, returning the page and the total count
    pub async fn list_pizzas_paginated(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Pizza>, i64), StorageError> {
        debug!("Fetching pizzas (limit: {:?}, offset: {:?})", limit, offset);

        let count = self.count_pizzas().await?;

        let rows = sqlx::query_as::<_, PizzaRow>(
            "SELECT id, name, created_at, updated_at FROM pizzas ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let pizza_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut toppings = self.load_toppings(&pizza_ids).await?;

        let pizzas = rows
            .into_iter()
            .map(|row| {
                let pizza_toppings = toppings.remove(&row.id).unwrap_or_default();
                row.into_pizza(pizza_toppings)
            })
            .collect();

        Ok((pizzas, count))
    }

    /// Total number of pizzas
    pub async fn count_pizzas(&self) -> Result<i64, StorageError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pizzas")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Get a single pizza with its toppings
    pub async fn get_pizza(&self, pizza_id: i64) -> Result<Pizza, StorageError> {
        debug!("Fetching pizza: {}", pizza_id);

        let row = sqlx::query_as::<_, PizzaRow>(
            "SELECT id, name, created_at, updated_at FROM pizzas WHERE id = ?",
        )
        .bind(pizza_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?
        .ok_or(StorageError::NotFound)?;

        let toppings = self
            .load_toppings(&[pizza_id])
            .await?
            .remove(&pizza_id)
            .unwrap_or_default();

        Ok(row.into_pizza(toppings))
    }

    /// Create a pizza together with its initial toppings
    pub async fn create_pizza(&self, input: PizzaCreateInput) -> Result<Pizza, StorageError> {
        validate_name(&input.name)?;

        debug!(
            "Creating pizza (name: {}, toppings: {:?})",
            input.name, input.topping_ids
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        if name_taken(&mut *tx, &input.name).await? {
            return Err(StorageError::DuplicateName(input.name));
        }

        ensure_toppings_exist(&mut *tx, &input.topping_ids).await?;

        let pizza_id = sqlx::query(
            r#"
            INSERT INTO pizzas (name, created_at, updated_at)
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

        attach_toppings(&mut *tx, pizza_id, &input.topping_ids).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_pizza(pizza_id).await
    }

    /// Rename a pizza. Renaming to the pizza's current name is a duplicate.
    pub async fn rename_pizza(&self, pizza_id: i64, new_name: &str) -> Result<Pizza, StorageError> {
        validate_name(new_name)?;

        debug!("Renaming pizza {} to {}", pizza_id, new_name);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        ensure_pizza_exists(&mut *tx, pizza_id).await?;

        if name_taken(&mut *tx, new_name).await? {
            return Err(StorageError::DuplicateName(new_name.to_string()));
        }

        sqlx::query("UPDATE pizzas SET name = ?, updated_at = ? WHERE id = ?")
            .bind(new_name)
            .bind(Utc::now())
            .bind(pizza_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_pizza(pizza_id).await
    }

    /// Delete a pizza and its topping links
    pub async fn delete_pizza(&self, pizza_id: i64) -> Result<(), StorageError> {
        debug!("Deleting pizza: {}", pizza_id);

        let result = sqlx::query("DELETE FROM pizzas WHERE id = ?")
            .bind(pizza_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Put toppings on a pizza. Toppings already on it are left as they are.
    pub async fn add_toppings(
        &self,
        pizza_id: i64,
        topping_ids: &[i64],
    ) -> Result<Pizza, StorageError> {
        debug!("Adding toppings {:?} to pizza {}", topping_ids, pizza_id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        ensure_pizza_exists(&mut *tx, pizza_id).await?;
        ensure_toppings_exist(&mut *tx, topping_ids).await?;
        attach_toppings(&mut *tx, pizza_id, topping_ids).await?;
        touch_pizza(&mut *tx, pizza_id).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_pizza(pizza_id).await
    }

    /// Take a topping off a pizza. Removing a topping the pizza lacks is a no-op.
    pub async fn remove_topping(
        &self,
        pizza_id: i64,
        topping_id: i64,
    ) -> Result<Pizza, StorageError> {
        debug!("Removing topping {} from pizza {}", topping_id, pizza_id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        ensure_pizza_exists(&mut *tx, pizza_id).await?;
        ensure_toppings_exist(&mut *tx, &[topping_id]).await?;
        detach_topping(&mut *tx, pizza_id, topping_id).await?;
        touch_pizza(&mut *tx, pizza_id).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_pizza(pizza_id).await
    }

    /// Swap one topping for a set of others in a single transaction
    pub async fn replace_topping(
        &self,
        pizza_id: i64,
        prior_topping_id: i64,
        replacement_ids: &[i64],
    ) -> Result<Pizza, StorageError> {
        debug!(
            "Replacing topping {} on pizza {} with {:?}",
            prior_topping_id, pizza_id, replacement_ids
        );

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        ensure_pizza_exists(&mut *tx, pizza_id).await?;
        ensure_toppings_exist(&mut *tx, &[prior_topping_id]).await?;
        ensure_toppings_exist(&mut *tx, replacement_ids).await?;
        detach_topping(&mut *tx, pizza_id, prior_topping_id).await?;
        attach_toppings(&mut *tx, pizza_id, replacement_ids).await?;
        touch_pizza(&mut *tx, pizza_id).await?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_pizza(pizza_id).await
    }

    /// Load the toppings of several pizzas in one query, keyed by pizza id
    async fn load_toppings(
        &self,
        pizza_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Topping>>, StorageError> {
        let mut by_pizza: HashMap<i64, Vec<Topping>> = HashMap::new();

        if pizza_ids.is_empty() {
            return Ok(by_pizza);
        }

        let placeholders = vec!["?"; pizza_ids.len()].join(", ");
        let query_str = format!(
            r#"
            SELECT pt.pizza_id, t.id, t.name, t.created_at, t.updated_at
            FROM pizza_toppings pt
            JOIN toppings t ON t.id = pt.topping_id
            WHERE pt.pizza_id IN ({})
            ORDER BY t.id
            "#,
            placeholders
        );

        let mut query = sqlx::query_as::<_, PizzaToppingRow>(&query_str);
        for pizza_id in pizza_ids {
            query = query.bind(pizza_id);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        for row in rows {
            by_pizza.entry(row.pizza_id).or_default().push(row.topping);
        }

        Ok(by_pizza)
    }
}

/// Exact, case-sensitive match against every existing pizza name
async fn name_taken(conn: &mut SqliteConnection, name: &str) -> Result<bool, StorageError> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pizzas WHERE name = ?)")
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(StorageError::Sqlx)
}

async fn ensure_pizza_exists(conn: &mut SqliteConnection, pizza_id: i64) -> Result<(), StorageError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pizzas WHERE id = ?)")
        .bind(pizza_id)
        .fetch_one(conn)
        .await
        .map_err(StorageError::Sqlx)?;

    if exists {
        Ok(())
    } else {
        Err(StorageError::NotFound)
    }
}

/// Fails with the first id that has no topping row
async fn ensure_toppings_exist(
    conn: &mut SqliteConnection,
    topping_ids: &[i64],
) -> Result<(), StorageError> {
    for topping_id in topping_ids {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM toppings WHERE id = ?)")
                .bind(topping_id)
                .fetch_one(&mut *conn)
                .await
                .map_err(StorageError::Sqlx)?;

        if !exists {
            return Err(StorageError::ToppingNotFound(*topping_id));
        }
    }

    Ok(())
}

async fn attach_toppings(
    conn: &mut SqliteConnection,
    pizza_id: i64,
    topping_ids: &[i64],
) -> Result<(), StorageError> {
    for topping_id in topping_ids {
        sqlx::query("INSERT OR IGNORE INTO pizza_toppings (pizza_id, topping_id) VALUES (?, ?)")
            .bind(pizza_id)
            .bind(topping_id)
            .execute(&mut *conn)
            .await
            .map_err(StorageError::Sqlx)?;
    }

    Ok(())
}

async fn detach_topping(
    conn: &mut SqliteConnection,
    pizza_id: i64,
    topping_id: i64,
) -> Result<(), StorageError> {
    sqlx::query("DELETE FROM pizza_toppings WHERE pizza_id = ? AND topping_id = ?")
        .bind(pizza_id)
        .bind(topping_id)
        .execute(conn)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(())
}

async fn touch_pizza(conn: &mut SqliteConnection, pizza_id: i64) -> Result<(), StorageError> {
    sqlx::query("UPDATE pizzas SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(pizza_id)
        .execute(conn)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(())
}
