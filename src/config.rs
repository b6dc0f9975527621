//! Connection configuration for the linearizer RPC client.

use std::time::Duration;

/// Default engine host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default JSON-RPC port of the linearization engine.
pub const DEFAULT_PORT: u16 = 9293;

/// Default bound on connect and per-read/write socket operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the linearization engine listens and how long to wait for it.
///
/// Supplied once at client construction and never mutated afterwards; safe
/// to share across concurrent callers.
///
/// # Example
///
/// ```ignore
/// let config = RpcConfig {
///     host: "10.0.0.7".into(),
///     ..RpcConfig::default()
/// };
/// let client = LinearizerClient::new(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// Engine hostname or IP address.
    pub host: String,
    /// Engine TCP port.
    pub port: u16,
    /// Bound applied to connect and to each subsequent socket operation.
    pub timeout: Duration,
}

impl RpcConfig {
    /// Build a config from explicit values.
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
