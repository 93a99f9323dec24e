// ABOUTME: Minimal client for Podman's native libpod REST API.
// ABOUTME: Serves pod operations and TLS-aware push over the unix socket.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use tokio::net::UnixStream;

/// Versioned prefix for every libpod route.
const API_PREFIX: &str = "/v4.0.0/libpod";

#[derive(Debug, thiserror::Error)]
pub(crate) enum LibpodError {
    #[error("failed to connect to {path}: {reason}")]
    Connect { path: String, reason: String },

    #[error("libpod request failed: {0}")]
    Http(String),
}

/// A fully read response.
#[derive(Debug)]
pub(crate) struct LibpodResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl LibpodResponse {
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, LibpodError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| LibpodError::Http(format!("unexpected response body: {e}")))
    }

    /// The `message` of a libpod error body, or the body as text.
    pub fn message(&self) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            message: String,
            #[serde(default)]
            cause: String,
        }

        match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(err) if !err.message.is_empty() => err.message,
            Ok(err) if !err.cause.is_empty() => err.cause,
            _ => {
                let text = String::from_utf8_lossy(&self.body).trim().to_string();
                if text.is_empty() {
                    self.status.to_string()
                } else {
                    text
                }
            }
        }
    }

    /// First `error` field found in a stream of JSON progress lines.
    pub fn stream_error(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct Progress {
            #[serde(default)]
            error: Option<String>,
        }

        self.body
            .split(|b| *b == b'\n')
            .filter_map(|line| serde_json::from_slice::<Progress>(line).ok())
            .find_map(|p| p.error.filter(|e| !e.is_empty()))
    }
}

/// One HTTP/1 connection per request over the engine's unix socket.
#[derive(Debug, Clone)]
pub(crate) struct LibpodClient {
    socket_path: String,
}

impl LibpodClient {
    pub fn new(socket_path: impl Into<String>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Send a request to `route` (below the libpod prefix) and read the whole reply.
    pub async fn request(
        &self,
        method: Method,
        route: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<LibpodResponse, LibpodError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| LibpodError::Connect {
                path: self.socket_path.clone(),
                reason: e.to_string(),
            })?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| LibpodError::Connect {
                path: self.socket_path.clone(),
                reason: format!("HTTP handshake failed: {e}"),
            })?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("libpod connection error: {}", e);
            }
        });

        let payload = match body {
            Some(value) => Bytes::from(
                serde_json::to_vec(value)
                    .map_err(|e| LibpodError::Http(format!("cannot encode body: {e}")))?,
            ),
            None => Bytes::new(),
        };

        let uri = format!("{API_PREFIX}{route}");
        tracing::debug!(%method, %uri, "libpod request");

        let req = hyper::Request::builder()
            .method(method)
            .uri(&uri)
            .header("Host", "localhost")
            .header("Content-Type", "application/json")
            .body(Full::new(payload))
            .map_err(|e| LibpodError::Http(format!("failed to build request: {e}")))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| LibpodError::Http(format!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| LibpodError::Http(format!("failed to read response: {e}")))?
            .to_bytes();

        Ok(LibpodResponse { status, body })
    }
}

/// Percent-encode one path segment or query value.
pub(crate) fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
