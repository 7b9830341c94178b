use std::time::SystemTime;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File served
/// - `Forbidden` (403): File exists but may not be read, or the path escaped the document root
/// - `NotFound` (404): No such file, or no index in a directory
/// - `MethodNotAllowed` (405): Anything other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not found
    NotFound,
    /// 405 Method not allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use otuserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use otuserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not found",
            StatusCode::MethodNotAllowed => "Method not allowed",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// `content_length` may be set without a body: HEAD responses report the
/// length of the body they leave out.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the Content-Type header, omitted when `None`
    pub content_type: Option<&'static str>,
    /// Value of the Content-Length header, omitted when `None`
    pub content_length: Option<usize>,
    /// Body bytes, if any are sent
    pub body: Option<Vec<u8>>,
    /// Capture time used for the Date header
    pub date: SystemTime,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body(b"hello".to_vec())
///     .build();
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<&'static str>,
    content_length: Option<usize>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_length: None,
            body: None,
        }
    }

    pub fn content_type(mut self, content_type: Option<&'static str>) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn content_length(mut self, len: usize) -> Self {
        self.content_length = Some(len);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the final Response, stamping it with the current time.
    ///
    /// A body without an explicit length gets a Content-Length matching it.
    pub fn build(mut self) -> Response {
        if self.content_length.is_none() {
            self.content_length = self.body.as_ref().map(Vec::len);
        }

        Response {
            status: self.status,
            content_type: self.content_type,
            content_length: self.content_length,
            body: self.body,
            date: SystemTime::now(),
        }
    }
}

impl Response {
    /// 200 OK carrying the whole file.
    pub fn ok(body: Vec<u8>, content_type: Option<&'static str>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// 200 OK for a HEAD request: headers describe the body, which is not sent.
    pub fn head(content_length: usize, content_type: Option<&'static str>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .content_length(content_length)
            .build()
    }

    /// Empty response for an error status, with `Content-Length: 0`.
    pub fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status).content_length(0).build()
    }

    pub fn forbidden() -> Self {
        Self::empty(StatusCode::Forbidden)
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    pub fn method_not_allowed() -> Self {
        Self::empty(StatusCode::MethodNotAllowed)
    }
}
