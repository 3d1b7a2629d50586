// ABOUTME: Server configuration read from the environment
// ABOUTME: Listen address, database location and pool size, and security header switches

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use pizzeria_config::constants::{
    ENABLE_HSTS, PIZZERIA_DATABASE_PATH, PIZZERIA_DB_MAX_CONNECTIONS, PIZZERIA_HOST,
    PIZZERIA_PORT, PORT, SECURITY_HEADERS_ENABLED,
};
use pizzeria_storage::StorageConfig;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub security_headers_enabled: bool,
    pub enable_hsts: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // PIZZERIA_PORT wins over the legacy PORT
        let port_str = env::var(PIZZERIA_PORT)
            .or_else(|_| env::var(PORT))
            .unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let port = parse_port(&port_str)?;

        let host_str = env::var(PIZZERIA_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let host = parse_host(&host_str)?;

        let database_path = env::var(PIZZERIA_DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| pizzeria_core::database_file());

        let max_connections = match env::var(PIZZERIA_DB_MAX_CONNECTIONS) {
            Ok(value) => match value.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: PIZZERIA_DB_MAX_CONNECTIONS,
                        value,
                    })
                }
            },
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let security_headers_enabled = parse_flag(SECURITY_HEADERS_ENABLED, true)?;
        let enable_hsts = parse_flag(ENABLE_HSTS, false)?;

        Ok(Config {
            host,
            port,
            database_path,
            max_connections,
            security_headers_enabled,
            enable_hsts,
        })
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = host {
            self.host = parse_host(&host)?;
        }
        if let Some(port) = port {
            if port == 0 {
                return Err(ConfigError::PortOutOfRange(port));
            }
            self.port = port;
        }
        if let Some(database) = database {
            self.database_path = database;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            max_connections: self.max_connections,
            ..StorageConfig::with_path(self.database_path.clone())
        }
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port = value.parse::<u16>()?;

    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }

    Ok(port)
}

fn parse_host(value: &str) -> Result<IpAddr, ConfigError> {
    value
        .parse::<IpAddr>()
        .map_err(|_| ConfigError::InvalidHost(value.to_string()))
}

/// Boolean switch; unset falls back to the default
fn parse_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
        Err(_) => Ok(default),
    }
}
