use clap::{Parser, Subcommand};
use partpack_core::options::{DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "partpack: split a compiled module into hostable parts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an artifact into `<prefix>0..N` part files, clearing old parts first
    Split {
        source: PathBuf,
        /// directory for the parts (defaults to the artifact's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// max bytes per part; accepts suffixes like 512K, 15MiB, 1G
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_size)]
        chunk_size: u64,
        /// also write `<prefix>.manifest.json` with sizes and BLAKE3 digests
        #[arg(long)]
        manifest: bool,
    },

    /// Concatenate the parts in a directory back into one file
    Reassemble {
        dir: PathBuf,
        out: PathBuf,
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// ignore `<prefix>.manifest.json` even if present
        #[arg(long)]
        no_verify: bool,
    },

    /// Check that a part set is complete (and matches its manifest, if any)
    Verify {
        dir: PathBuf,
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },

    /// List parts in index order
    List {
        dir: PathBuf,
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },

    /// Copy the Go wasm runtime shim (wasm_exec.js) into a directory
    CopyShim {
        dest_dir: PathBuf,
        /// Go installation root; `go env GOROOT` is asked when unset
        #[arg(long, env = "GOROOT")]
        goroot: Option<PathBuf>,
    },

    /// Point quoted module references in an HTML page at a hosted URL
    RewriteHtml {
        html: PathBuf,
        /// new module URL
        #[arg(long)]
        url: String,
        /// reference to replace
        #[arg(long, default_value = "build/main.wasm")]
        from: String,
        /// also delete this unsplit artifact
        #[arg(long)]
        remove_artifact: Option<PathBuf>,
    },
}

/// Parse a byte count with an optional binary-multiple suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    if digits.is_empty() {
        return Err(format!("invalid size: {s:?}"));
    }
    let n: u64 = digits.parse().map_err(|e| format!("invalid size {s:?}: {e}"))?;
    let mult: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => 1 << 10,
        "m" | "mb" | "mib" => 1 << 20,
        "g" | "gb" | "gib" => 1 << 30,
        other => return Err(format!("unknown size unit {other:?}")),
    };
    let size = n
        .checked_mul(mult)
        .ok_or_else(|| format!("size {s:?} overflows"))?;
    if size == 0 {
        return Err("size must be greater than zero".into());
    }
    Ok(size)
}
