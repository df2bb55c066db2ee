//! Movie data providers
//!
//! A provider turns a title into a JSON document. The concrete provider
//! talks to the OMDb API over plain HTTP; tests substitute their own.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use url::Url;

use crate::config::MoviesConfig;
use crate::error::LookupError;

/// Default buffer size for reading provider responses
const BUFFER_SIZE: usize = 8192;

/// Provider responses larger than this are rejected
const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// Source of movie metadata.
///
/// `fetch` receives the title exactly as the client sent it, still
/// percent-encoded, and returns the response body on success.
pub trait MovieProvider: Send + Sync + 'static {
    fn fetch(&self, title: &str) -> impl Future<Output = Result<String, LookupError>> + Send;
}

/// Client for the OMDb API (`http://www.omdbapi.com/?t=<title>&apikey=<key>`).
pub struct OmdbProvider {
    base_url: Url,
    api_key: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl OmdbProvider {
    pub fn new(config: &MoviesConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.provider_url).context("Invalid provider URL")?;

        if base_url.scheme() != "http" {
            anyhow::bail!("Unsupported provider URL scheme: {}", base_url.scheme());
        }
        base_url.host_str().context("Provider URL missing host")?;

        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
        })
    }

    /// URL queried for `title`.
    ///
    /// The title is placed into the query as received, so an already encoded
    /// `%20` reaches the provider as a space rather than as `%2520`.
    pub fn request_url(&self, title: &str) -> Url {
        let mut url = self.base_url.clone();
        let query = if self.api_key.is_empty() {
            format!("t={}", title)
        } else {
            format!("t={}&apikey={}", title, self.api_key)
        };
        url.set_query(Some(&query));
        url
    }

    /// Build HTTP request bytes for `url`
    ///
    /// HTTP/1.0 keeps the provider from answering with chunked encoding and
    /// makes it close the connection after the body.
    pub fn build_http_request(&self, url: &Url) -> Vec<u8> {
        let target = &url[url::Position::BeforePath..url::Position::AfterQuery];
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        let mut buffer = Vec::new();
        buffer.extend_from_slice(format!("GET {} HTTP/1.0\r\n", target).as_bytes());
        buffer.extend_from_slice(format!("Host: {}\r\n", host).as_bytes());
        buffer.extend_from_slice(b"Accept: application/json\r\n");
        buffer.extend_from_slice(b"Connection: close\r\n");
        buffer.extend_from_slice(b"\r\n");
        buffer
    }

    async fn send(&self, url: &Url) -> Result<String, LookupError> {
        let host = url
            .host_str()
            .ok_or_else(|| LookupError::Transport("provider URL missing host".to_string()))?;
        let port = url.port_or_known_default().unwrap_or(80);
        let addr = format!("{}:{}", host, port);

        let mut stream = timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| LookupError::Timeout)?
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        tracing::trace!(addr = %addr, "Connected to movie provider");

        timeout(self.request_timeout, async {
            stream
                .write_all(&self.build_http_request(url))
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?;
            stream
                .flush()
                .await
                .map_err(|e| LookupError::Transport(e.to_string()))?;

            let raw = read_to_close(&mut stream).await?;
            parse_response(&raw)
        })
        .await
        .map_err(|_| LookupError::Timeout)?
    }
}

impl MovieProvider for OmdbProvider {
    async fn fetch(&self, title: &str) -> Result<String, LookupError> {
        let url = self.request_url(title);
        tracing::debug!(title = %title, "Querying movie provider");

        let result = self.send(&url).await;
        if let Err(e) = &result {
            tracing::warn!(title = %title, error = %e, "Movie provider lookup failed");
        }
        result
    }
}

async fn read_to_close(stream: &mut TcpStream) -> Result<Vec<u8>, LookupError> {
    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);

    loop {
        let n = stream
            .read_buf(&mut buffer)
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if n == 0 {
            return Ok(buffer.to_vec());
        }

        if buffer.len() > MAX_RESPONSE_SIZE {
            return Err(LookupError::Transport("provider response too large".to_string()));
        }
    }
}

/// Extracts the body from a complete provider response.
///
/// Anything but a 200 status, or a 200 with an empty body, is a failure.
/// When `Content-Length` is present the body is cut to that length.
pub fn parse_response(raw: &[u8]) -> Result<String, LookupError> {
    let headers_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| LookupError::Transport("incomplete provider response".to_string()))?;

    let head = std::str::from_utf8(&raw[..headers_end])
        .map_err(|_| LookupError::Transport("invalid provider response headers".to_string()))?;
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| {
            LookupError::Transport(format!("invalid status line: {}", status_line))
        })?;

    if status != 200 {
        return Err(LookupError::Status(status));
    }

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok());

    let mut body = &raw[headers_end + 4..];
    if let Some(len) = content_length {
        body = &body[..len.min(body.len())];
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(LookupError::EmptyBody);
    }

    Ok(String::from_utf8_lossy(body).into_owned())
}
