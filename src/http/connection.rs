use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::files::{serve, DocumentRoot};
use crate::http::parser::{find_headers_end, parse_http_request, ParseError, TERMINATOR};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 1024;

/// Per-connection resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionLimits {
    /// Largest accepted header block, terminator excluded.
    pub max_header_bytes: usize,
    /// How long a connection may stay silent while awaiting headers.
    /// `None` waits forever.
    pub idle_timeout: Option<Duration>,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8 * 1024,
            idle_timeout: None,
        }
    }
}

/// One client socket and the request/response cycle running on it.
pub struct Connection<S> {
    stream: S,
    root: Arc<DocumentRoot>,
    limits: ConnectionLimits,
    buffer: BytesMut,
    /// Prefix of `buffer` already known to hold no terminator
    scanned: usize,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    /// Accumulating bytes until the header terminator shows up
    AwaitingHeaders,
    /// A full request was parsed and needs an answer
    Dispatching(Request),
    /// Pushing the response out; the flag says whether to keep the socket
    Writing(ResponseWriter, bool),
    /// Response sent on a keep-alive connection
    Idle,
    /// Terminal: the socket is shut down and released
    Closing,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, root: Arc<DocumentRoot>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            root,
            limits,
            buffer: BytesMut::with_capacity(4096),
            scanned: 0,
            state: ConnectionState::AwaitingHeaders,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection until it closes.
    ///
    /// Returns an error for socket failures and for unexpected filesystem
    /// errors while serving; the socket is dropped without a response then.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::AwaitingHeaders => {
                    self.state = match self.read_request().await? {
                        Some(req) => ConnectionState::Dispatching(req),
                        None => ConnectionState::Closing,
                    };
                }

                ConnectionState::Dispatching(req) => {
                    info!(
                        method = req.method.as_str(),
                        path = %req.path,
                        version = %req.version,
                        "request"
                    );

                    let response = serve(req, &self.root)?;
                    let keep_alive = req.keep_alive();
                    debug!(status = response.status.as_u16(), keep_alive, "response ready");

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    let keep_alive = *keep_alive;
                    writer.write_to_stream(&mut self.stream).await?;

                    self.state = if keep_alive {
                        ConnectionState::Idle
                    } else {
                        ConnectionState::Closing
                    };
                }

                ConnectionState::Idle => {
                    debug!(buffered = self.buffer.len(), "re-using connection");
                    self.state = ConnectionState::AwaitingHeaders;
                }

                ConnectionState::Closing => {
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "shutdown failed");
                    }
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the buffer holds a full header block.
    ///
    /// `None` means the connection should close: the peer went away, went
    /// quiet past the idle timeout, or sent something that is not a request.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            // Bytes left over from the previous request come first
            match self.take_request() {
                Ok(Some(request)) => return Ok(Some(request)),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "dropping connection without response");
                    return Ok(None);
                }
            }

            self.buffer.reserve(READ_CHUNK);
            let read = self.stream.read_buf(&mut self.buffer);

            let n = match self.limits.idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, read).await {
                    Ok(res) => res?,
                    Err(_) => {
                        info!(timeout = ?limit, "idle timeout, closing connection");
                        return Ok(None);
                    }
                },
                None => read.await?,
            };

            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(buffered = self.buffer.len(), "peer closed mid-request");
                }
                return Ok(None);
            }
        }
    }

    /// Splits one complete request off the front of the buffer, if present.
    fn take_request(&mut self) -> Result<Option<Request>, ParseError> {
        let max = self.limits.max_header_bytes;

        // A terminator may straddle the old end of the buffer
        let from = self.scanned.saturating_sub(TERMINATOR.len() - 1);
        let found = find_headers_end(&self.buffer[from..]).map(|pos| from + pos);

        match found {
            Some(end) if end > max => Err(ParseError::HeaderTooLarge { size: end, max }),
            Some(end) => {
                let (request, consumed) = parse_http_request(&self.buffer[..end + TERMINATOR.len()])?;
                self.buffer.advance(consumed);
                self.scanned = 0;
                Ok(Some(request))
            }
            // A terminator arriving later would still start past the limit
            None if self.buffer.len() >= max + TERMINATOR.len() => Err(ParseError::HeaderTooLarge {
                size: self.buffer.len(),
                max,
            }),
            None => {
                self.scanned = self.buffer.len();
                Ok(None)
            }
        }
    }
}
