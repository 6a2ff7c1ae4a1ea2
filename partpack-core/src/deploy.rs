//! Small build-pipeline steps that run around the splitter: staging the Go
//! runtime shim next to the parts, pointing the page at the hosted module,
//! and dropping the unsplit artifact from the upload directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const SHIM_FILE: &str = "wasm_exec.js";

/// Location of the runtime shim inside a Go installation.
pub fn shim_path(goroot: &Path) -> PathBuf {
    goroot.join("lib").join("wasm").join(SHIM_FILE)
}

/// Copy `src` into `dest_dir` under its own file name.
pub fn copy_shim(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a file path: {}", src.display()),
        )
    })?;
    fs::create_dir_all(dest_dir)?;
    let dest = dest_dir.join(name);
    fs::copy(src, &dest)?;
    tracing::info!(from = %src.display(), to = %dest.display(), "copied runtime shim");
    Ok(dest)
}

/// Replace every quoted `from` in `html` with `"to"`.
///
/// Both `"from"` and `'from'` match. The file is rewritten only when at least
/// one reference changed. Returns the number of replacements.
pub fn rewrite_html_refs(html: &Path, from: &str, to: &str) -> Result<usize> {
    let content = fs::read_to_string(html)?;
    let (rewritten, count) = replace_quoted(&content, from, to);
    if count > 0 {
        fs::write(html, rewritten)?;
        tracing::info!(html = %html.display(), count, to, "rewrote module references");
    } else {
        tracing::warn!(html = %html.display(), from, "no module references found");
    }
    Ok(count)
}

fn replace_quoted(content: &str, from: &str, to: &str) -> (String, usize) {
    let replacement = format!("\"{to}\"");
    let mut out = content.to_string();
    let mut count = 0;
    for q in ['"', '\''] {
        let needle = format!("{q}{from}{q}");
        let n = out.matches(&needle).count();
        if n > 0 {
            out = out.replace(&needle, &replacement);
            count += n;
        }
    }
    (out, count)
}

/// Delete the unsplit artifact. `Ok(false)` when it was already gone.
pub fn remove_artifact(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "deleted artifact");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "artifact not found, skipping deletion");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
