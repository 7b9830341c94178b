use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &str = "\r\n";

/// Value of the Server header.
pub const SERVER_NAME: &str = "OTUServer/1.0";

/// Serializes a response: status line, Date, Server, optional Content-Type,
/// optional Content-Length, blank line, then the body if there is one.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut head = String::with_capacity(160);

    // Status line
    head.push_str(&format!(
        "{} {} {}{CRLF}",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    ));

    head.push_str(&format!("Date: {}{CRLF}", httpdate::fmt_http_date(resp.date)));
    head.push_str(&format!("Server: {SERVER_NAME}{CRLF}"));

    if let Some(content_type) = resp.content_type {
        head.push_str(&format!("Content-Type: {content_type}{CRLF}"));
    }
    if let Some(len) = resp.content_length {
        head.push_str(&format!("Content-Length: {len}{CRLF}"));
    }

    // Header/body separator
    head.push_str(CRLF);

    let mut buf = head.into_bytes();
    if let Some(body) = &resp.body {
        buf.extend_from_slice(body);
    }
    buf
}

/// Outbound bytes of one response and how many of them reached the peer.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.written >= self.buffer.len()
    }

    /// Flushes the remaining bytes, resuming after a short write.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while !self.is_done() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
