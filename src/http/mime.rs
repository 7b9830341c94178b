use std::path::Path;

/// Extension to MIME type table. Extensions not listed here get no
/// Content-Type header at all.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("txt", "text/plain"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("swf", "application/x-shockwave-flash"),
];

/// Guesses the content type of a file from its final extension.
///
/// The match is exact, so `INDEX.HTML` has no known type.
///
/// # Example
///
/// ```
/// # use otuserver::http::mime::content_type_for;
/// assert_eq!(content_type_for("site/index.html"), Some("text/html"));
/// assert_eq!(content_type_for("archive.tar.gz"), None);
/// ```
pub fn content_type_for(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?;
    CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}
