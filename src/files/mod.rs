//! Static file serving below a document root.
//!
//! - **`resolver`**: maps a decoded request path onto a file confined to the root
//! - **`serve`**: reads the file and picks the response for the request method

pub mod resolver;
pub mod serve;

use anyhow::Context;
use std::path::{Path, PathBuf};

pub use resolver::resolve;
pub use serve::{serve, ServeError};

/// File served when a request names a directory.
pub const INDEX_FILE: &str = "index.html";

/// Absolute, canonical directory that every served file must live under.
///
/// Built once at startup and shared read-only with all connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoot {
    path: PathBuf,
}

impl DocumentRoot {
    /// Canonicalizes `path` and checks that it is a directory.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path)
            .with_context(|| format!("document root {} is not accessible", path.display()))?;

        if !canonical.is_dir() {
            anyhow::bail!("document root {} is not a directory", canonical.display());
        }

        Ok(Self { path: canonical })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `candidate` lies at or below the root.
    pub fn contains(&self, candidate: &Path) -> bool {
        candidate.starts_with(&self.path)
    }
}
