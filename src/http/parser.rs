use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Blank line that ends the header block.
pub const TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("header block is not terminated yet")]
    Incomplete,

    #[error("header block is not valid UTF-8")]
    InvalidEncoding,

    #[error("malformed request line: {line:?}")]
    InvalidRequestLine { line: String },

    #[error("malformed header line: {line:?}")]
    InvalidHeader { line: String },

    #[error("request path does not decode to UTF-8: {location:?}")]
    InvalidPath { location: String },

    #[error("header block of {size} bytes exceeds the limit of {max} bytes")]
    HeaderTooLarge { size: usize, max: usize },
}

/// Parses the first complete request in `buf`.
///
/// Returns the request and the number of bytes it occupied, terminator
/// included. Anything after that belongs to the next request.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;

    let block = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::InvalidEncoding)?;

    let request = parse_header_block(block)?;
    Ok((request, headers_end + TERMINATOR.len()))
}

/// Turns a raw header block (terminator excluded) into a [`Request`].
pub fn parse_header_block(block: &str) -> Result<Request, ParseError> {
    let mut lines = block.split("\r\n");

    // Request line
    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let [method, location, version] = parts.as_slice() else {
        return Err(ParseError::InvalidRequestLine {
            line: request_line.to_string(),
        });
    };

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (name, value) = split_header(line).ok_or_else(|| ParseError::InvalidHeader {
            line: line.to_string(),
        })?;

        headers.insert(name.to_ascii_lowercase(), value.to_string());
    }

    Ok(Request {
        method: Method::from_token(method),
        path: decode_location(location)?,
        version: version.to_string(),
        headers,
    })
}

/// Locates the start of the terminator, if the buffer holds one.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(TERMINATOR.len())
        .position(|w| w == TERMINATOR)
}

/// Splits `Name: value` at the first run of whitespace. The name token
/// must end in a colon, so `Name:value` and `Name value` are both malformed.
fn split_header(line: &str) -> Option<(&str, &str)> {
    let (token, value) = line.split_once(char::is_whitespace)?;
    let name = token.strip_suffix(':')?;
    if name.is_empty() || name.contains(':') {
        return None;
    }
    Some((name, value.trim_start()))
}

/// URL-decodes the location (`+` is a space) and drops the query string.
fn decode_location(location: &str) -> Result<String, ParseError> {
    let plus_decoded = location.replace('+', " ");
    let decoded = urlencoding::decode(&plus_decoded).map_err(|_| ParseError::InvalidPath {
        location: location.to_string(),
    })?;

    let path = match decoded.split_once('?') {
        Some((path, _query)) => path,
        None => &*decoded,
    };
    Ok(path.to_string())
}
