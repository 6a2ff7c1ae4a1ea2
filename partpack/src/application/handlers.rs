use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use partpack_core::deploy::{copy_shim, remove_artifact, rewrite_html_refs, shim_path};
use partpack_core::error::{PartError, Result};
use partpack_core::{
    FsPartSource, ReassembleOptions, SplitOptions, list_parts, reassemble_into, split, verify,
};
use tempfile::NamedTempFile;

const MIB: f64 = 1024.0 * 1024.0;

pub fn handle_split(
    source: PathBuf,
    out_dir: Option<PathBuf>,
    prefix: String,
    chunk_size: u64,
    manifest: bool,
) -> Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| parent_dir(&source));
    let opts = SplitOptions {
        prefix,
        chunk_size,
        write_manifest: manifest,
    };
    let report = split(&source, &out_dir, &opts)?;
    for p in &report.parts {
        println!("{}  {:.2}MB", p.name, p.size as f64 / MIB);
    }
    eprintln!(
        "split: {} parts ({:.2}MB) in {}",
        report.num_chunks(),
        report.total_size as f64 / MIB,
        out_dir.display()
    );
    Ok(())
}

pub fn handle_reassemble(dir: PathBuf, out: PathBuf, prefix: String, no_verify: bool) -> Result<()> {
    let source = FsPartSource::new(dir);
    let opts = ReassembleOptions {
        prefix,
        verify_manifest: !no_verify,
    };
    // Only a complete artifact ever lands at `out`.
    let target_dir = parent_dir(&out);
    std::fs::create_dir_all(&target_dir)?;
    let mut tmp = NamedTempFile::new_in(&target_dir)?;
    let report = reassemble_into(&source, &opts, tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.persist(&out).map_err(|e| PartError::Io(e.error))?;
    eprintln!(
        "reassemble: {} parts, {} bytes -> {}",
        report.parts,
        report.total_size,
        out.display()
    );
    Ok(())
}

pub fn handle_verify(dir: PathBuf, prefix: String) -> Result<()> {
    let report = verify(&FsPartSource::new(dir), &prefix)?;
    println!(
        "parts={} bytes={} blake3={}",
        report.parts,
        report.total_size,
        hex::encode(report.blake3)
    );
    if report.manifest_checked {
        eprintln!("verify: OK (manifest)");
    } else {
        eprintln!("verify: OK (no manifest, contiguity only)");
    }
    Ok(())
}

pub fn handle_list(dir: PathBuf, prefix: String) -> Result<()> {
    let rows = list_parts(&FsPartSource::new(dir), &prefix)?;
    for r in rows {
        println!("#{:<5} {}  {} bytes", r.index, r.name, r.size);
    }
    Ok(())
}

pub fn handle_copy_shim(dest_dir: PathBuf, goroot: Option<PathBuf>) -> Result<()> {
    let goroot = match goroot {
        Some(g) => g,
        None => go_env_goroot()?,
    };
    let dest = copy_shim(&shim_path(&goroot), &dest_dir)?;
    eprintln!("copy-shim: {}", dest.display());
    Ok(())
}

pub fn handle_rewrite_html(
    html: PathBuf,
    url: String,
    from: String,
    remove: Option<PathBuf>,
) -> Result<()> {
    if let Some(artifact) = remove {
        remove_artifact(&artifact)?;
    }
    let n = rewrite_html_refs(&html, &from, &url)?;
    eprintln!("rewrite-html: {n} reference(s) in {}", html.display());
    Ok(())
}

fn parent_dir(p: &Path) -> PathBuf {
    match p.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn go_env_goroot() -> Result<PathBuf> {
    let out = Command::new("go").args(["env", "GOROOT"]).output()?;
    if !out.status.success() {
        return Err(PartError::Format(format!(
            "`go env GOROOT` failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    let root = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if root.is_empty() {
        return Err(PartError::Format("`go env GOROOT` printed nothing".into()));
    }
    Ok(PathBuf::from(root))
}
