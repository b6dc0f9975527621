//! Typed JSON-RPC client for the DAG linearization engine.
//!
//! `LinearizerClient` gives each remote operation a named, strongly-typed
//! call shape. Every call is one linear sequence on the caller's task:
//! connect, send, receive until a complete JSON document accumulates,
//! decode. One socket per call, never reused, closed on every exit path.
//! Resilience policy (retries, pooling, circuit breaking) belongs to the
//! caller.
//!
//! # Example
//!
//! ```ignore
//! use linearizer_client::{LinearizerClient, RpcConfig};
//!
//! let client = LinearizerClient::default();
//! let tips = client.get_tips().await?;
//! for tip in tips {
//!     println!("{} @ {}", tip.id, tip.score);
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::RpcConfig;
use crate::error::ClientError;
use crate::models::ScoredNode;
use crate::protocol::{self, JsonRpcRequest};
use crate::transport;

/// Client handle for the linearization engine.
///
/// Holds the immutable connection config and the monotonic request-id
/// counter — the only mutable state, atomic so a shared client never issues
/// duplicate ids. Cheap to construct; no connection is held between calls.
pub struct LinearizerClient {
    config: RpcConfig,
    /// Next correlation id; incremented once per outbound call, never
    /// reused, never persisted.
    request_id: AtomicU64,
}

impl LinearizerClient {
    /// Build a client for the given engine endpoint.
    pub fn new(config: RpcConfig) -> Self {
        Self {
            config,
            request_id: AtomicU64::new(1),
        }
    }

    /// The endpoint this client talks to.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Issue one raw JSON-RPC call and return the `result` value verbatim.
    ///
    /// `params: None` omits the `params` key from the wire entirely. The
    /// typed endpoint methods below are thin wrappers over this; it is
    /// public so callers can reach methods this crate has no wrapper for.
    ///
    /// # Errors
    ///
    /// One of the four [`ClientError`] kinds: the engine was unreachable,
    /// it closed without data, it returned bytes that are not one JSON-RPC
    /// response, or it answered with an RPC error object.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError> {
        let id = self.next_id();
        let request = JsonRpcRequest::new(method, params, id);
        debug!(method, id, "issuing rpc call");

        let raw = {
            let mut stream = transport::open(&self.config).await?;
            transport::send_all(&mut stream, &request.to_bytes(), &self.config).await?;
            transport::receive_until_complete(&mut stream, &self.config).await?
            // Stream dropped here: the socket is closed before decode runs.
        };

        match protocol::decode(&raw) {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(method, id, %err, "rpc call failed");
                Err(err)
            }
        }
    }

    /// `call` plus deserialization into the endpoint's declared shape.
    async fn call_typed<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T, ClientError> {
        let result = self.call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::MalformedResponse(format!("unexpected result shape: {e}")))
    }

    // ---- Typed endpoints ----

    /// Current DAG frontier: the tip descriptors with their ordering scores.
    pub async fn get_tips(&self) -> Result<Vec<ScoredNode>, ClientError> {
        self.call_typed("get_tips", None).await
    }

    /// The full linearized ordering of all nodes the engine knows.
    pub async fn get_tip_order(&self) -> Result<Vec<ScoredNode>, ClientError> {
        self.call_typed("get_tip_order", None).await
    }

    /// Structural-learning-ready snapshot of the most recent `n` nodes.
    ///
    /// The snapshot layout belongs to the engine and is returned verbatim.
    pub async fn get_snapshot(&self, n: u64) -> Result<Value, ClientError> {
        self.call("get_snapshot", Some(json!({ "n": n }))).await
    }

    /// Liveness probe; returns the engine's health descriptor verbatim.
    pub async fn get_health(&self) -> Result<Value, ClientError> {
        self.call("get_health", None).await
    }

    /// Nodes whose ordering score lies in `[from_score, to_score]`.
    ///
    /// No client-side validation: an inverted range is forwarded verbatim
    /// and whatever the engine returns (success or error) is surfaced
    /// unchanged.
    pub async fn linearize_range(
        &self,
        from_score: u64,
        to_score: u64,
    ) -> Result<Vec<ScoredNode>, ClientError> {
        self.call_typed(
            "linearize_range",
            Some(json!({ "from_score": from_score, "to_score": to_score })),
        )
        .await
    }

    /// Hot-swap the engine's `k` ordering parameter; returns the engine's
    /// confirmation of the applied value.
    pub async fn update_k(&self, new_k: u64) -> Result<Value, ClientError> {
        self.call("update_k", Some(json!({ "new_k": new_k }))).await
    }

    /// Submit a payload, letting the engine pick `parent_count` parents.
    ///
    /// Returns the engine's descriptor of the accepted submission.
    /// `parent_count` is forwarded as supplied; the engine rejects values
    /// it considers invalid.
    pub async fn smart_submit(
        &self,
        payload: &str,
        parent_count: u32,
    ) -> Result<Value, ClientError> {
        self.call(
            "smart_submit",
            Some(json!({ "payload": payload, "parent_count": parent_count })),
        )
        .await
    }
}

impl Default for LinearizerClient {
    /// Client pointed at the default local engine (`localhost:9293`, 5 s
    /// timeout).
    fn default() -> Self {
        Self::new(RpcConfig::default())
    }
}
