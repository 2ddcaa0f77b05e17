// Startup configuration: positional arguments parsed by clap, then
// validated into a `ClientConfig` that the session is built from.

use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u32 = 3000;
pub const DEFAULT_DATABASE: &str = "vehicles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Interactive client for a vintage car record store.
#[derive(Parser, Debug)]
#[command(name = "vintage-car-db", version, long_about = None)]
pub struct Cli {
    /// Address of the server hosting the store, e.g. http://localhost
    pub server_address: String,

    /// Port of the server (1..65536, default 3000)
    #[arg(allow_negative_numbers = true)]
    pub port: Option<String>,

    /// Name of the collection (default "vehicles")
    pub database: Option<String>,

    /// Car id that must exist in the store at startup
    #[arg(allow_negative_numbers = true)]
    pub car_id: Option<String>,

    /// Seconds to wait for each request before giving up (default 10)
    #[arg(long, env = "VINTAGE_CARS_TIMEOUT_SECS", allow_negative_numbers = true)]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_address: String,
    pub port: u32,
    pub database: String,
    pub car_id: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let port = match &cli.port {
            Some(raw) => parse_port(raw)?,
            None => DEFAULT_PORT,
        };

        let car_id = match &cli.car_id {
            Some(id) if !id.chars().all(|c| c.is_ascii_digit()) => {
                return Err(ConfigError::CarId(id.clone()))
            }
            Some(id) if id.is_empty() => None,
            other => other.clone(),
        };

        let timeout = match &cli.timeout {
            Some(raw) => parse_timeout(raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(ClientConfig {
            server_address: cli.server_address.clone(),
            port,
            database: cli
                .database
                .clone()
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            car_id,
            timeout: Duration::from_secs(timeout),
        })
    }
}

fn parse_port(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(port) if (1..=65536).contains(&port) => Ok(port),
        _ => Err(ConfigError::Port(raw.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Timeout(raw.to_string())),
    }
}
