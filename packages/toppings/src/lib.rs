// ABOUTME: Topping catalog managed by the Owner
// ABOUTME: Provides types and storage layer for toppings

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::ToppingStorage;
pub use types::{Topping, ToppingCreateInput};
