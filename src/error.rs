//! Error taxonomy for the linearizer RPC client.
//!
//! Every failure a call can produce maps to exactly one variant, so callers
//! can branch on the distinction between "engine unreachable" (worth
//! retrying), "engine rejected the request" (surface to the user), and
//! "engine returned garbage" (protocol trouble). The client itself never
//! retries, swallows, or defaults any of these.

use thiserror::Error;

/// Failure modes of a single RPC round trip.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the engine, or the connection broke mid-exchange.
    ///
    /// Covers refused connections, unreachable hosts, a connect that exceeds
    /// the configured timeout, and hard I/O errors while sending or
    /// receiving.
    #[error("cannot connect to linearization engine at {host}:{port}: {source}")]
    ConnectionFailed {
        /// Host the client tried to reach.
        host: String,
        /// Port the client tried to reach.
        port: u16,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The engine closed the connection without sending any data.
    #[error("empty response from RPC server")]
    EmptyResponse,

    /// The received bytes are not one parseable JSON-RPC response.
    ///
    /// Includes a response truncated by the read timeout and a well-formed
    /// JSON result that does not match the endpoint's declared shape.
    #[error("malformed response from RPC server: {0}")]
    MalformedResponse(String),

    /// The engine answered with a well-formed JSON-RPC error object.
    ///
    /// `code` and `message` are passed through verbatim; missing members
    /// fall back to [`UNKNOWN_ERROR_CODE`](crate::protocol::UNKNOWN_ERROR_CODE)
    /// and `"unknown"`.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code, verbatim from the engine.
        code: i64,
        /// JSON-RPC error message, verbatim from the engine.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failed_names_host_and_port() {
        let err = ClientError::ConnectionFailed {
            host: "localhost".into(),
            port: 9293,
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        let msg = err.to_string();
        assert!(msg.contains("localhost:9293"), "got: {msg}");
    }

    #[test]
    fn rpc_error_display() {
        let err = ClientError::Rpc {
            code: -32601,
            message: "method not found".into(),
        };
        assert_eq!(err.to_string(), "RPC error -32601: method not found");
    }

    #[test]
    fn empty_and_malformed_display() {
        assert_eq!(
            ClientError::EmptyResponse.to_string(),
            "empty response from RPC server"
        );
        let err = ClientError::MalformedResponse("trailing bytes".into());
        assert_eq!(
            err.to_string(),
            "malformed response from RPC server: trailing bytes"
        );
    }
}
