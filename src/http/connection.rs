use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::parser::{decode_line, find_line_end, ParseError};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::movies::MovieProvider;
use crate::router::Router;

/// Request lines longer than this are rejected with 400.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One client connection: a single request line in, a single response out.
///
/// Anything the client sends after the request line (headers, body) is
/// never read. The stream is shut down once `run` returns, whatever the
/// outcome.
pub struct Connection<S, P> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router<P>>,
    read_timeout: Duration,
    request_timeout: Duration,
}

pub enum ConnectionState {
    Reading,
    Processing(Result<String, ParseError>),
    Writing(ResponseWriter),
    Closed,
}

impl<S, P> Connection<S, P>
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: MovieProvider,
{
    pub fn new(stream: S, router: Arc<Router<P>>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            state: ConnectionState::Reading,
            router,
            read_timeout: DEFAULT_READ_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Sets how long to wait for the request line and how long routing may take.
    pub fn with_timeouts(mut self, read_timeout: Duration, request_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self.request_timeout = request_timeout;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match timeout(self.read_timeout, self.read_request_line()).await {
                        Ok(Ok(Some(line))) => ConnectionState::Processing(line),
                        Ok(Ok(None)) => ConnectionState::Closed,
                        Ok(Err(e)) => return Err(e),
                        Err(_) => {
                            tracing::debug!("Timed out waiting for request line");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Processing(line) => {
                    let response = match line {
                        Ok(line) => {
                            tracing::info!(request = %line, "Received request");
                            match timeout(self.request_timeout, self.router.respond(&line)).await {
                                Ok(response) => response,
                                Err(_) => {
                                    tracing::warn!(request = %line, "Request deadline exceeded");
                                    Response::error(StatusCode::GatewayTimeout)
                                }
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Unreadable request line");
                            Response::bad_request()
                        }
                    };

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads up to the first newline.
    ///
    /// Returns `None` when the client sent nothing (or only a blank line)
    /// before closing. A final line without a terminator is still accepted.
    pub async fn read_request_line(&mut self) -> anyhow::Result<Option<Result<String, ParseError>>> {
        loop {
            if let Some(end) = find_line_end(&self.buffer) {
                let raw = self.buffer.split_to(end + 1);
                return Ok(Self::finish_line(&raw));
            }

            if self.buffer.len() > MAX_REQUEST_LINE {
                return Ok(Some(Err(ParseError::InvalidRequest)));
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                let raw = self.buffer.split();
                return Ok(Self::finish_line(&raw));
            }
        }
    }

    fn finish_line(raw: &[u8]) -> Option<Result<String, ParseError>> {
        match decode_line(raw) {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok(line.to_string())),
            Err(e) => Some(Err(e)),
        }
    }
}
