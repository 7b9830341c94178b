use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::files::{resolve, DocumentRoot};
use crate::http::mime::content_type_for;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// I/O failure that is neither "not found" nor "permission denied".
///
/// No response is produced for it; the connection is dropped instead.
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", .path.display())]
pub struct ServeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Answers one request from the files under `root`.
///
/// The file is located and read before the method is looked at, so a PUT
/// to a missing file is a 404 rather than a 405.
pub fn serve(req: &Request, root: &DocumentRoot) -> Result<Response, ServeError> {
    let Some(path) = resolve(&req.path, root) else {
        debug!(path = %req.path, "path does not resolve to a file");
        return Ok(Response::not_found());
    };

    debug!(file = %path.display(), "checking local file");

    if !root.contains(&path) {
        warn!(
            path = %req.path,
            file = %path.display(),
            root = %root.path().display(),
            "resolved path escaped the document root"
        );
        return Ok(Response::forbidden());
    }

    let content = match std::fs::read(&path) {
        Ok(content) => content,
        Err(e) => {
            return match response_for_read_error(&e) {
                Some(response) => {
                    debug!(file = %path.display(), error = %e, "file not served");
                    Ok(response)
                }
                None => Err(ServeError { path, source: e }),
            };
        }
    };

    let content_type = content_type_for(&path);

    let response = match req.method {
        Method::GET => Response::ok(content, content_type),
        Method::HEAD => Response::head(content.len(), content_type),
        Method::Other(_) => Response::method_not_allowed(),
    };
    Ok(response)
}

/// Maps the read failures a client can be told about onto a response.
fn response_for_read_error(e: &std::io::Error) -> Option<Response> {
    match e.kind() {
        ErrorKind::PermissionDenied => Some(Response::forbidden()),
        ErrorKind::NotFound | ErrorKind::NotADirectory => Some(Response::not_found()),
        _ => None,
    }
}
