//! Page retrieval over HTTP.
//!
//! The orchestrator talks to the network through the [`PageFetcher`] trait,
//! which lets tests drive the whole pipeline from in-memory pages. The
//! production implementation is [`HttpFetcher`].
//!
//! # Timeouts
//!
//! No timeout is configured unless the operator asks for one, so a source
//! that never answers stalls the run. `--timeout-secs` turns a hung request
//! into an ordinary transport failure.

use crate::error::FetchError;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Trait for retrieving the raw markup behind a URL.
///
/// Implementors perform exactly one attempt per call. Retrying is not part of
/// the contract.
pub trait PageFetcher {
    /// Fetch the body of `url`.
    ///
    /// # Returns
    ///
    /// The response body on a success status, or a [`FetchError`] describing
    /// the bad status or transport failure.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with an optional per-request timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Total time allowed per request, or `None` to wait forever
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let transport = |e: reqwest::Error| FetchError::Transport {
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Non-success status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a random local port.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/news")
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let url = serve_once(http_response("200 OK", "<article></article>")).await;
        let fetcher = HttpFetcher::new(None).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<article></article>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_failure() {
        let url = serve_once(http_response("404 Not Found", "missing")).await;
        let fetcher = HttpFetcher::new(None).unwrap();

        match fetcher.fetch(&url).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(None).unwrap();
        let result = fetcher.fetch(&format!("http://{addr}/")).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let fetcher = HttpFetcher::new(Some(Duration::from_millis(200))).unwrap();
        let result = fetcher.fetch(&format!("http://{addr}/")).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
