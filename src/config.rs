use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

// Runtime configuration for the chain follower binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,              // Node JSON-RPC endpoint
    pub rpc_user: Option<String>,     // RPC username, if the node requires auth
    pub rpc_password: Option<String>, // RPC password
    pub start_height: u64,            // First height to process
    pub confirmations: u64,           // Blocks required on top before a height is final
    pub poll_interval: Duration,      // Delay between catch-up cycles
}

impl Config {
    // Loads configuration from environment variables, with defaults for
    // everything except the RPC endpoint.
    pub fn from_env() -> Result<Self> {
        let config = Config {
            rpc_url: env::var("RPC_URL")
                .map_err(|_| Error::Config("RPC_URL must be set".to_string()))?,
            rpc_user: env::var("RPC_USER").ok(),
            rpc_password: env::var("RPC_PASSWORD").ok(),
            start_height: parse_var("START_HEIGHT", 1)?,
            confirmations: parse_var("CONFIRMATIONS", 120)?,
            poll_interval: Duration::from_millis(parse_var("POLL_INTERVAL_MS", 1000)?),
        };
        Ok(config)
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{name} must be an integer, got `{raw}`"))),
        Err(_) => Ok(default),
    }
}
