//! JSON-RPC 2.0 envelope codec.
//!
//! Builds outbound request objects and classifies raw response bytes into
//! success-with-result or one of the protocol error kinds. This layer has no
//! socket awareness: "did the wire produce a complete document" is the
//! transport's problem, "is the document a valid RPC success/error" is
//! decided here.
//!
//! # Wire Format
//!
//! ```text
//! request:  {"jsonrpc":"2.0","method":"get_tips","id":1}
//! request:  {"jsonrpc":"2.0","method":"get_snapshot","id":2,"params":{"n":100}}
//! success:  {"jsonrpc":"2.0","result":[...],"id":1}
//! error:    {"jsonrpc":"2.0","error":{"code":-32601,"message":"..."},"id":2}
//! ```
//!
//! `params` is omitted entirely when absent — never serialized as `null` —
//! because strict JSON-RPC 2.0 servers reject a present-but-empty params key
//! for parameterless methods.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ClientError;

/// Protocol version literal sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Sentinel error code used when the engine's error object omits `code`.
pub const UNKNOWN_ERROR_CODE: i64 = i64::MIN;

/// Message used when the engine's error object omits `message`.
const UNKNOWN_ERROR_MESSAGE: &str = "unknown";

/// One outbound JSON-RPC 2.0 request. Constructed fresh per call and
/// immutable once serialized.
#[derive(Debug, Clone)]
pub struct JsonRpcRequest {
    /// RPC method name (e.g. `get_tips`).
    pub method: String,
    /// Client-side correlation id, monotonic per client instance.
    pub id: u64,
    /// Method parameters; `None` means no `params` key on the wire.
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a request for `method` with the given correlation id.
    pub fn new(method: impl Into<String>, params: Option<Value>, id: u64) -> Self {
        Self {
            method: method.into(),
            id,
            params,
        }
    }

    /// Serialize to the exact on-wire byte form.
    ///
    /// Infallible: the envelope is built from plain strings, integers, and
    /// an already-valid `Value`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut request = json!({
            "jsonrpc": JSONRPC_VERSION,
            "method": self.method,
            "id": self.id,
        });
        if let Some(params) = &self.params {
            request["params"] = params.clone();
        }
        request.to_string().into_bytes()
    }
}

/// Inbound response envelope. Unknown members (`jsonrpc`, `id`, ...) are
/// ignored; only `result` and `error` carry meaning for the client.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    /// `error: null` deserializes to `None`, which the spec treats the same
    /// as an absent error member.
    #[serde(default)]
    error: Option<RpcErrorObject>,
    #[serde(default)]
    result: Option<Value>,
}

/// The `error` member of a response, with lenient defaults: a server that
/// sends a bare `{}` error object still decodes, it just reports the
/// sentinel code and `"unknown"`.
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default = "missing_code")]
    code: i64,
    #[serde(default = "missing_message")]
    message: String,
}

fn missing_code() -> i64 {
    UNKNOWN_ERROR_CODE
}

fn missing_message() -> String {
    UNKNOWN_ERROR_MESSAGE.to_string()
}

/// Classify raw response bytes into the `result` value or a typed failure.
///
/// - zero bytes → [`ClientError::EmptyResponse`] (peer closed before
///   anything parseable arrived);
/// - bytes that do not parse as one JSON-RPC response object →
///   [`ClientError::MalformedResponse`] (covers truncation by the read
///   timeout);
/// - a non-null `error` member → [`ClientError::Rpc`] with code and message
///   passed through verbatim;
/// - otherwise the `result` value, verbatim. A missing `result` decodes as
///   `Value::Null`; the codec performs no further interpretation.
pub fn decode(raw: &[u8]) -> Result<Value, ClientError> {
    if raw.is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    let response: JsonRpcResponse = serde_json::from_slice(raw)
        .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

    if let Some(err) = response.error {
        return Err(ClientError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    Ok(response.result.unwrap_or(Value::Null))
}
