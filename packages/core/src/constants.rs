use std::env;
use std::path::PathBuf;

/// Longest name accepted for a topping or a pizza, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// File name of the SQLite database inside the Pizzeria directory
pub const DATABASE_FILE_NAME: &str = "pizzeria.db";

/// Get the path to the Pizzeria directory (~/.pizzeria)
pub fn pizzeria_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".pizzeria")
    } else {
        // Fall back to dirs crate, then the working directory
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pizzeria")
    }
}

/// Get the default database path (~/.pizzeria/pizzeria.db)
pub fn database_file() -> PathBuf {
    pizzeria_dir().join(DATABASE_FILE_NAME)
}
