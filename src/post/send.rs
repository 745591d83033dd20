//! HTTP posting of generated transmissions to an OTM integration servlet.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;

use super::guard::check_endpoint;

/// A posting destination with credentials.
#[derive(Debug, Clone)]
pub struct PostTarget {
    /// Integration servlet URL; must pass the endpoint guard.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Gzip the request body and send `Content-Encoding: gzip`.
    pub gzip: bool,
}

impl PostTarget {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            gzip: false,
        }
    }

    pub fn gzip(mut self, on: bool) -> Self {
        self.gzip = on;
        self
    }
}

/// Errors from a post attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PostError {
    /// The endpoint guard refused the URL — no network call was made.
    #[error("post blocked: {reason} ({url})")]
    EndpointRejected { url: String, reason: String },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

const POST_TIMEOUT_SECS: u64 = 60;

/// Post one XML payload to an OTM endpoint and return the ack body verbatim.
///
/// Every call is gated by [`check_endpoint`] before any network I/O; a
/// refused URL yields [`PostError::EndpointRejected`]. One synchronous
/// request-response exchange — no retry, no redirect-chasing beyond
/// reqwest's defaults.
pub async fn post_payload(target: &PostTarget, xml: &str) -> Result<String, PostError> {
    let decision = check_endpoint(&target.url);
    if !decision.allowed {
        return Err(PostError::EndpointRejected {
            url: decision.url,
            reason: decision.reason,
        });
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(POST_TIMEOUT_SECS))
        .build()
        .map_err(|e| PostError::Network(e.to_string()))?;

    let mut request = client
        .post(&target.url)
        .basic_auth(&target.username, Some(&target.password))
        .header("Content-Type", "text/xml; charset=UTF-8");

    let body = if target.gzip {
        request = request.header("Content-Encoding", "gzip");
        gzip_body(xml)?
    } else {
        xml.as_bytes().to_vec()
    };

    let resp = request
        .body(body)
        .send()
        .await
        .map_err(|e| PostError::Network(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| PostError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(PostError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn gzip_body(xml: &str) -> Result<Vec<u8>, PostError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .map_err(|e| PostError::Network(format!("gzip error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| PostError::Network(format!("gzip error: {e}")))
}
