use crate::config::{Config, ConfigError, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

const VARS: [&str; 7] = [
    "PIZZERIA_PORT",
    "PORT",
    "PIZZERIA_HOST",
    "PIZZERIA_DATABASE_PATH",
    "PIZZERIA_DB_MAX_CONNECTIONS",
    "SECURITY_HEADERS_ENABLED",
    "ENABLE_HSTS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    assert!(config.database_path.ends_with(".pizzeria/pizzeria.db"));
    assert!(config.security_headers_enabled);
    assert!(!config.enable_hsts);
}

#[test]
#[serial]
fn test_pizzeria_port_wins_over_legacy_port() {
    clear_env();
    env::set_var("PORT", "3000");

    assert_eq!(Config::from_env().unwrap().port, 3000);

    env::set_var("PIZZERIA_PORT", "9090");
    assert_eq!(Config::from_env().unwrap().port, 9090);

    clear_env();
}

#[test]
#[serial]
fn test_config_with_all_custom() {
    clear_env();
    env::set_var("PIZZERIA_HOST", "0.0.0.0");
    env::set_var("PIZZERIA_DATABASE_PATH", "/tmp/pizzeria-test.db");
    env::set_var("PIZZERIA_DB_MAX_CONNECTIONS", "3");
    env::set_var("SECURITY_HEADERS_ENABLED", "false");
    env::set_var("ENABLE_HSTS", "true");

    let config = Config::from_env().unwrap();

    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.database_path, PathBuf::from("/tmp/pizzeria-test.db"));
    assert_eq!(config.max_connections, 3);
    assert_eq!(config.storage_config().max_connections, 3);
    assert!(!config.security_headers_enabled);
    assert!(config.enable_hsts);

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_port() {
    clear_env();
    env::set_var("PIZZERIA_PORT", "not-a-number");

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::InvalidPort(_))));

    clear_env();
}

#[test]
#[serial]
fn test_config_port_zero() {
    clear_env();
    env::set_var("PIZZERIA_PORT", "0");

    let result = Config::from_env();
    assert!(matches!(result, Err(ConfigError::PortOutOfRange(0))));

    clear_env();
}

#[rstest]
#[case("PIZZERIA_HOST", "localhost:80")]
#[case("PIZZERIA_DB_MAX_CONNECTIONS", "0")]
#[case("PIZZERIA_DB_MAX_CONNECTIONS", "many")]
#[case("SECURITY_HEADERS_ENABLED", "maybe")]
#[serial]
fn test_config_invalid_values(#[case] var: &str, #[case] value: &str) {
    clear_env();
    env::set_var(var, value);

    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides() {
    clear_env();

    let config = Config::from_env()
        .unwrap()
        .with_overrides(
            Some("::1".to_string()),
            Some(4242),
            Some(PathBuf::from("/tmp/override.db")),
        )
        .unwrap();

    assert_eq!(config.socket_addr().to_string(), "[::1]:4242");
    assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));

    let rejected = Config::from_env()
        .unwrap()
        .with_overrides(None, Some(0), None);
    assert!(matches!(rejected, Err(ConfigError::PortOutOfRange(0))));
}
