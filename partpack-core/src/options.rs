use serde::{Deserialize, Serialize};

/// Part prefix used by the build pipeline for the compiled module.
pub const DEFAULT_PREFIX: &str = "main.wasm.part";

/// Stays under the hosting platform's per-file limit.
pub const DEFAULT_CHUNK_SIZE: u64 = 15 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub prefix: String,
    /// Upper bound on each part, in bytes. Must be non-zero.
    pub chunk_size: u64,
    /// Also write `<prefix>.manifest.json` with sizes and BLAKE3 digests.
    pub write_manifest: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            write_manifest: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReassembleOptions {
    pub prefix: String,
    /// Check parts against the manifest when one is present.
    pub verify_manifest: bool,
}

impl Default for ReassembleOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            verify_manifest: true,
        }
    }
}
