// ABOUTME: Pizza type definitions
// ABOUTME: A pizza is a named set of toppings

use chrono::{DateTime, Utc};
use pizzeria_toppings::Topping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    /// Toppings on this pizza, ordered by topping id
    pub toppings: Vec<Topping>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pizza {
    /// Whether the given topping is on this pizza
    pub fn has_topping(&self, topping_id: i64) -> bool {
        self.toppings.iter().any(|t| t.id == topping_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PizzaCreateInput {
    pub name: String,
    /// Ids of existing toppings to put on the new pizza
    #[serde(default)]
    pub topping_ids: Vec<i64>,
}
