// ABOUTME: Pizza catalog managed by the Chef
// ABOUTME: Provides pizza types and storage, including the pizza-to-topping relationship

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::PizzaStorage;
pub use types::{Pizza, PizzaCreateInput};
