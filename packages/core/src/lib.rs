// ABOUTME: Core types, naming rules, and shared paths for Pizzeria
// ABOUTME: Foundational package used by the storage, entity, and HTTP packages

pub mod constants;
pub mod validation;

// Re-export constants
pub use constants::{database_file, pizzeria_dir, MAX_NAME_LENGTH};

// Re-export validation
pub use validation::{validate_name, EntityKind, NameRejection, Outcome};
