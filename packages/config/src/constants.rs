// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Pizzeria

// Server Configuration
pub const PIZZERIA_PORT: &str = "PIZZERIA_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const PIZZERIA_HOST: &str = "PIZZERIA_HOST";

// Database Configuration
pub const PIZZERIA_DATABASE_PATH: &str = "PIZZERIA_DATABASE_PATH";
pub const PIZZERIA_DB_MAX_CONNECTIONS: &str = "PIZZERIA_DB_MAX_CONNECTIONS";

// Security Headers
pub const SECURITY_HEADERS_ENABLED: &str = "SECURITY_HEADERS_ENABLED";
pub const ENABLE_HSTS: &str = "ENABLE_HSTS";
