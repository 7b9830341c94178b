#![allow(dead_code)]

use std::fs;

use otuserver::files::DocumentRoot;
use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Document root with a small site in it:
///
/// ```text
/// index.html      "<h1>home</h1>"
/// readme.txt      "read me\n"
/// style.css       "body {}"
/// blob.xyz        [0, 1, 2, 3, 4, 5]
/// docs/index.html "<p>docs</p>"
/// empty/
/// ```
pub fn site() -> (TempDir, DocumentRoot) {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fs::write(base.join("index.html"), b"<h1>home</h1>").unwrap();
    fs::write(base.join("readme.txt"), b"read me\n").unwrap();
    fs::write(base.join("style.css"), b"body {}").unwrap();
    fs::write(base.join("blob.xyz"), [0u8, 1, 2, 3, 4, 5]).unwrap();
    fs::create_dir(base.join("docs")).unwrap();
    fs::write(base.join("docs/index.html"), b"<p>docs</p>").unwrap();
    fs::create_dir(base.join("empty")).unwrap();

    let root = DocumentRoot::new(base).unwrap();
    (dir, root)
}

/// A response as seen by the client.
#[derive(Debug)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").map(|v| v.parse().unwrap())
    }
}

/// Reads one response head off the stream. The body is read only when
/// `with_body` is set, sized by Content-Length.
pub async fn read_response<R>(stream: &mut R, with_body: bool) -> RawResponse
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        let byte = stream.read_u8().await.expect("stream ended inside response head");
        head.push(byte);
    }

    let text = String::from_utf8(head).unwrap();
    let mut lines = text.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter(|l| !l.is_empty())
        .map(|l| {
            let (k, v) = l.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    let mut response = RawResponse {
        status_line,
        headers,
        body: Vec::new(),
    };

    if with_body {
        let mut body = vec![0u8; response.content_length().unwrap_or(0)];
        stream.read_exact(&mut body).await.unwrap();
        response.body = body;
    }
    response
}
