//! One-shot TCP transport for the RPC round trip.
//!
//! Each call opens a fresh connection, pushes one byte payload, collects one
//! byte payload, and closes. The wire carries no length prefix or delimiter,
//! so the receive loop treats "the accumulated bytes parse as one complete
//! JSON value" as the end-of-message signal — the only framing signal the
//! engine's protocol offers. The transport itself stays protocol-blind
//! beyond that parse probe; classifying the bytes is the codec's job.
//!
//! Sockets never outlive the call that opened them: the stream is owned by
//! the calling scope and dropped (closed) on every exit path.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::config::RpcConfig;
use crate::error::ClientError;

/// Read granularity for the receive loop.
const READ_CHUNK_SIZE: usize = 64 * 1024;

fn connection_failed(config: &RpcConfig, source: io::Error) -> ClientError {
    ClientError::ConnectionFailed {
        host: config.host.clone(),
        port: config.port,
        source,
    }
}

/// Connect to the engine, bounded by `config.timeout`.
///
/// Refusal, unreachability, and a connect that outlasts the timeout all
/// surface as [`ClientError::ConnectionFailed`]; nothing is retried here.
pub async fn open(config: &RpcConfig) -> Result<TcpStream, ClientError> {
    let addr = (config.host.as_str(), config.port);
    match timeout(config.timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(source)) => Err(connection_failed(config, source)),
        Err(_) => Err(connection_failed(
            config,
            io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
        )),
    }
}

/// Write the full payload, looping over partial writes, bounded by
/// `config.timeout`.
pub async fn send_all(
    stream: &mut TcpStream,
    payload: &[u8],
    config: &RpcConfig,
) -> Result<(), ClientError> {
    match timeout(config.timeout, stream.write_all(payload)).await {
        Ok(Ok(())) => {
            trace!(bytes = payload.len(), "request payload sent");
            Ok(())
        }
        Ok(Err(source)) => Err(connection_failed(config, source)),
        Err(_) => Err(connection_failed(
            config,
            io::Error::new(io::ErrorKind::TimedOut, "write timed out"),
        )),
    }
}

/// Accumulate reads until the buffer parses as one complete JSON value.
///
/// Three ways out of the loop, all returning the accumulated buffer:
///
/// - the buffer parses as a complete JSON document (the normal case);
/// - the peer closes the connection first (zero-length read) — the buffer
///   may be empty or a prefix;
/// - a single read blocks past `config.timeout` — timeout-as-truncation,
///   the buffer holds whatever arrived.
///
/// The codec downstream turns an empty or truncated buffer into the
/// matching error kind. Only a hard I/O error fails here.
pub async fn receive_until_complete(
    stream: &mut TcpStream,
    config: &RpcConfig,
) -> Result<Vec<u8>, ClientError> {
    let mut accumulated = Vec::new();
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];

    loop {
        match timeout(config.timeout, stream.read(&mut chunk)).await {
            // Peer closed; return whatever arrived.
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                accumulated.extend_from_slice(&chunk[..n]);
                // JSON self-delimitation is the framing boundary.
                if serde_json::from_slice::<serde_json::Value>(&accumulated).is_ok() {
                    break;
                }
            }
            Ok(Err(source)) => return Err(connection_failed(config, source)),
            // Timeout-as-truncation: stop and hand back the partial buffer.
            Err(_) => {
                debug!(
                    accumulated = accumulated.len(),
                    "read timed out before a complete document accumulated"
                );
                break;
            }
        }
    }

    Ok(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    /// Bind an ephemeral listener and return it with a config pointing at it.
    async fn listener_and_config(timeout: Duration) -> (TcpListener, RpcConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        (listener, RpcConfig::new("127.0.0.1", port, timeout))
    }

    #[tokio::test]
    async fn open_refused_names_host_and_port() {
        // Bind then drop to get a port with no listener.
        let (listener, config) = listener_and_config(Duration::from_secs(1)).await;
        drop(listener);

        let err = open(&config).await.expect_err("connect should fail");
        match &err {
            ClientError::ConnectionFailed { host, port, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(*port, config.port);
            }
            other => panic!("expected ConnectionFailed, got {other:?}"),
        }
        assert!(err.to_string().contains(&format!("127.0.0.1:{}", config.port)));
    }

    #[tokio::test]
    async fn receive_stops_at_complete_json_without_peer_close() {
        let (listener, config) = listener_and_config(Duration::from_secs(5)).await;

        let server = tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.expect("accept");
            peer.write_all(br#"{"jsonrpc":"2.0","result":42,"id":1}"#)
                .await
                .expect("write");
            // Keep the connection open; the client must not wait for EOF.
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(peer);
        });

        let mut stream = open(&config).await.expect("connect");
        let got = tokio::time::timeout(
            Duration::from_secs(2),
            receive_until_complete(&mut stream, &config),
        )
        .await
        .expect("must return before the server closes")
        .expect("receive");

        assert_eq!(got, br#"{"jsonrpc":"2.0","result":42,"id":1}"#);
        server.abort();
    }

    #[tokio::test]
    async fn receive_reassembles_chunked_delivery() {
        let (listener, config) = listener_and_config(Duration::from_secs(5)).await;

        let server = tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.expect("accept");
            peer.write_all(br#"{"jsonrpc":"2.0","result":[{"id":"a","#)
                .await
                .expect("write");
            peer.flush().await.expect("flush");
            tokio::time::sleep(Duration::from_millis(50)).await;
            peer.write_all(br#""score":12}],"id":1}"#).await.expect("write");
        });

        let mut stream = open(&config).await.expect("connect");
        let got = receive_until_complete(&mut stream, &config)
            .await
            .expect("receive");

        assert_eq!(got, br#"{"jsonrpc":"2.0","result":[{"id":"a","score":12}],"id":1}"#);
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn peer_close_returns_partial_buffer() {
        let (listener, config) = listener_and_config(Duration::from_secs(5)).await;

        let server = tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.expect("accept");
            peer.write_all(br#"{"jsonrpc":"2.0","resu"#).await.expect("write");
            // Close before a parseable document accumulates.
        });

        let mut stream = open(&config).await.expect("connect");
        let got = receive_until_complete(&mut stream, &config)
            .await
            .expect("receive");

        assert_eq!(got, br#"{"jsonrpc":"2.0","resu"#);
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn peer_close_with_no_data_returns_empty_buffer() {
        let (listener, config) = listener_and_config(Duration::from_secs(5)).await;

        let server = tokio::spawn(async move {
            let (peer, _) = listener.accept().await.expect("accept");
            drop(peer);
        });

        let mut stream = open(&config).await.expect("connect");
        let got = receive_until_complete(&mut stream, &config)
            .await
            .expect("receive");

        assert!(got.is_empty());
        server.await.expect("server task");
    }

    #[tokio::test]
    async fn read_timeout_truncates_instead_of_hanging() {
        let (listener, config) = listener_and_config(Duration::from_millis(200)).await;

        let server = tokio::spawn(async move {
            let (mut peer, _) = listener.accept().await.expect("accept");
            peer.write_all(br#"{"jsonrpc":"2.0","result":["#)
                .await
                .expect("write");
            // Go quiet well past the client's read timeout.
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(peer);
        });

        let mut stream = open(&config).await.expect("connect");
        let got = receive_until_complete(&mut stream, &config)
            .await
            .expect("receive");

        assert_eq!(got, br#"{"jsonrpc":"2.0","result":["#);
        server.abort();
    }
}
