use eyre::Result;
use serde::Deserialize;
use std::time::Duration;

/// Prefix of the environment variables read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "ETHNODE";

/// Service configuration structure
///
/// This structure contains all the configuration parameters for the node service.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Node endpoint: HTTP, WebSocket or IPC (default: http://localhost:8545)
    pub rpc_url: String,

    /// Upper bound on connecting to and detecting the node (default: 10)
    pub dial_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file if present, then the process environment.
    ///
    /// # Environment Variables
    ///
    /// * `ETHNODE_HOST` - Server host address (default: "127.0.0.1")
    /// * `ETHNODE_PORT` - Server port (default: 8080)
    /// * `ETHNODE_RPC_URL` - Node RPC URL (default: "http://localhost:8545")
    /// * `ETHNODE_DIAL_TIMEOUT_SECS` - Dial and detection timeout (default: 10)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_source(::config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Build the configuration from defaults overlaid with `env`
    pub fn from_source(env: ::config::Environment) -> Result<Self> {
        let config = ::config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080_i64)?
            .set_default("rpc_url", "http://localhost:8545")?
            .set_default("dial_timeout_secs", 10_i64)?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }
}
