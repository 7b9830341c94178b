use std::path::PathBuf;

use crate::files::{DocumentRoot, INDEX_FILE};

/// Maps a decoded request path onto a filesystem path under `root`.
///
/// The request path is normalized on its own first, as if rooted at `/`:
/// `.` segments vanish and `..` never climbs above the top. Only then is it
/// joined to the root, so the result always starts with the root.
///
/// A directory resolves to its `index.html`. A plain file addressed with a
/// trailing `/` resolves to nothing.
pub fn resolve(rel_path: &str, root: &DocumentRoot) -> Option<PathBuf> {
    if rel_path.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in rel_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }

    let mut full = root.path().to_path_buf();
    full.extend(segments);

    if full.is_dir() {
        full.push(INDEX_FILE);
    } else if full.is_file() && rel_path.ends_with('/') {
        return None;
    }

    Some(full)
}
