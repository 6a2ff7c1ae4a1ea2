use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::container::manifest::{Manifest, manifest_name};
use crate::domain::{PartRow, SplitReport};
use crate::error::{PartError, Result};
use crate::naming::part_name;
use crate::options::SplitOptions;
use crate::plan::PartPlan;
use crate::split::stale::clear_stale;

const MIB: f64 = 1024.0 * 1024.0;

/// Split `source` into `<prefix>0 .. <prefix>N-1` inside `out_dir`.
///
/// Any file already in `out_dir` starting with the prefix is removed first;
/// if that fails nothing new is written. Parts already written before a later
/// failure stay in place and a re-run starts from a clean directory again.
pub fn split(source: &Path, out_dir: &Path, opts: &SplitOptions) -> Result<SplitReport> {
    if opts.chunk_size == 0 {
        return Err(PartError::InvalidChunkSize(0));
    }

    // The whole artifact fits in memory: the hosting limit bounds it already.
    let artifact = match fs::read(source) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PartError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    let plan = PartPlan::new(artifact.len() as u64, opts.chunk_size)?;
    tracing::info!(
        source = %source.display(),
        size_mb = %format!("{:.2}", plan.total_size as f64 / MIB),
        chunk_mb = %format!("{:.2}", plan.chunk_size as f64 / MIB),
        chunks = plan.num_parts(),
        "splitting artifact"
    );

    fs::create_dir_all(out_dir)?;
    let removed_stale = clear_stale(out_dir, &opts.prefix, Some(source))?;

    let mut parts = Vec::with_capacity(plan.num_parts() as usize);
    for (i, r) in plan.ranges().enumerate() {
        let index = i as u64;
        let name = part_name(&opts.prefix, index);
        let path = out_dir.join(&name);
        let bytes = &artifact[r.start as usize..r.end as usize];
        write_atomic(out_dir, &path, bytes)?;
        tracing::debug!(
            part = %name,
            size_mb = %format!("{:.2}", bytes.len() as f64 / MIB),
            "created part"
        );
        parts.push(PartRow {
            index,
            name,
            size: bytes.len() as u64,
        });
    }

    let manifest = if opts.write_manifest {
        let m = Manifest::build(&opts.prefix, &plan, &artifact);
        let path = out_dir.join(manifest_name(&opts.prefix));
        write_atomic(out_dir, &path, &m.to_json()?)?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        chunks = parts.len(),
        removed_stale,
        out_dir = %out_dir.display(),
        "split complete"
    );
    Ok(SplitReport {
        total_size: plan.total_size,
        chunk_size: plan.chunk_size,
        parts,
        manifest,
        removed_stale,
    })
}

/// `split` with the bare four-argument contract; returns the part count.
pub fn split_file(source: &Path, out_dir: &Path, prefix: &str, chunk_size: u64) -> Result<u64> {
    let opts = SplitOptions {
        prefix: prefix.to_string(),
        chunk_size,
        write_manifest: false,
    };
    Ok(split(source, out_dir, &opts)?.num_chunks())
}

/// Write through a temp file in `dir` and rename into place, so `path` never
/// holds a half-written part.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let fail = |source: std::io::Error| PartError::Write {
        path: PathBuf::from(path),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.flush().map_err(fail)?;
    // temp files are created owner-only; parts get served as static files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(fail)?;
    }
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}
