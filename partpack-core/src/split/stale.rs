use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PartError, Result};
use crate::naming::is_stale_candidate;

/// Files directly inside `dir` whose name starts with `prefix`.
///
/// `keep` is excluded even when it matches, so an artifact that sits next to
/// its own parts is never cleared.
pub fn find_stale(dir: &Path, prefix: &str, keep: Option<&Path>) -> Result<Vec<PathBuf>> {
    let keep = keep.and_then(|p| fs::canonicalize(p).ok());
    let mut found = Vec::new();
    for e in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let e = e.map_err(std::io::Error::other)?;
        if !is_stale_candidate(prefix, e.file_name()) {
            continue;
        }
        if let Some(k) = &keep {
            if fs::canonicalize(e.path()).ok().as_ref() == Some(k) {
                continue;
            }
        }
        found.push(e.path().to_path_buf());
    }
    found.sort();
    Ok(found)
}

/// Delete every stale file. Stops at the first failure.
pub fn clear_stale(dir: &Path, prefix: &str, keep: Option<&Path>) -> Result<usize> {
    let stale = find_stale(dir, prefix, keep)?;
    for path in &stale {
        fs::remove_file(path).map_err(|source| PartError::StaleCleanup {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "deleted existing chunk");
    }
    Ok(stale.len())
}
