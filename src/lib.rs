//! JSON-RPC 2.0 client library for the DAG linearization engine.
//!
//! This crate provides the client side of the engine's JSON-RPC protocol:
//!
//! - `config` - connection endpoint and timeout settings
//! - `transport` - one-shot TCP session (connect, send, receive, close)
//! - `protocol` - JSON-RPC envelope encoding and response classification
//! - `client` - typed per-endpoint facade over the layers above
//! - `models` - serde models for the engine's typed results
//!
//! # Protocol
//!
//! The engine speaks JSON-RPC 2.0 over a raw TCP stream (default port 9293)
//! with no explicit framing; a response is complete when the accumulated
//! bytes parse as one JSON document. Each call opens its own connection and
//! closes it before returning.
//!
//! # Usage
//!
//! ```ignore
//! use linearizer_client::{LinearizerClient, RpcConfig};
//!
//! let client = LinearizerClient::new(RpcConfig::default());
//! let tips = client.get_tips().await?;
//! let order = client.get_tip_order().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod transport;

pub use client::LinearizerClient;
pub use config::{RpcConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use models::ScoredNode;
pub use protocol::{JsonRpcRequest, UNKNOWN_ERROR_CODE};
