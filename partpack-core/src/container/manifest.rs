use serde::{Deserialize, Serialize};

use crate::error::{PartError, Result};
use crate::naming::part_name;
use crate::plan::PartPlan;

pub const MANIFEST_VERSION: u16 = 1;
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

/// Manifest file name for a prefix. Never parses as a part index.
pub fn manifest_name(prefix: &str) -> String {
    format!("{prefix}{MANIFEST_SUFFIX}")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestPart {
    pub index: u64,
    pub name: String,
    pub size: u64,
    pub blake3: String, // hex
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub version: u16,
    pub prefix: String,
    pub chunk_size: u64,
    pub total_size: u64,
    pub blake3: String, // hex, whole artifact
    pub parts: Vec<ManifestPart>,
}

impl Manifest {
    pub fn build(prefix: &str, plan: &PartPlan, artifact: &[u8]) -> Self {
        let parts = plan
            .ranges()
            .enumerate()
            .map(|(i, r)| {
                let bytes = &artifact[r.start as usize..r.end as usize];
                ManifestPart {
                    index: i as u64,
                    name: part_name(prefix, i as u64),
                    size: bytes.len() as u64,
                    blake3: blake3::hash(bytes).to_hex().to_string(),
                }
            })
            .collect();
        Self {
            version: MANIFEST_VERSION,
            prefix: prefix.to_string(),
            chunk_size: plan.chunk_size,
            total_size: plan.total_size,
            blake3: blake3::hash(artifact).to_hex().to_string(),
            parts,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| PartError::Format(format!("manifest encode: {e}")))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let m: Manifest = serde_json::from_slice(bytes)
            .map_err(|e| PartError::Format(format!("manifest decode: {e}")))?;
        if m.version != MANIFEST_VERSION {
            return Err(PartError::Format(format!(
                "unsupported manifest version {}",
                m.version
            )));
        }
        Ok(m)
    }

    /// Check fetched parts, in index order, against the recorded sizes and digests.
    pub fn check_parts(&self, parts: &[Vec<u8>]) -> Result<()> {
        if parts.len() != self.parts.len() {
            return Err(PartError::ManifestMismatch(format!(
                "expected {} parts, found {}",
                self.parts.len(),
                parts.len()
            )));
        }
        for (entry, bytes) in self.parts.iter().zip(parts) {
            if entry.size != bytes.len() as u64 {
                return Err(PartError::ManifestMismatch(format!(
                    "{}: expected {} bytes, found {}",
                    entry.name,
                    entry.size,
                    bytes.len()
                )));
            }
            if !digest_matches(&entry.blake3, blake3::hash(bytes).as_bytes())? {
                return Err(PartError::ManifestMismatch(format!(
                    "{}: digest differs",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    pub fn check_artifact(&self, total_size: u64, digest: &[u8; 32]) -> Result<()> {
        if total_size != self.total_size {
            return Err(PartError::ManifestMismatch(format!(
                "expected {} bytes in total, found {total_size}",
                self.total_size
            )));
        }
        if !digest_matches(&self.blake3, digest)? {
            return Err(PartError::ManifestMismatch("artifact digest differs".into()));
        }
        Ok(())
    }
}

fn digest_matches(expected_hex: &str, got: &[u8; 32]) -> Result<bool> {
    let expected = hex::decode(expected_hex.trim())
        .map_err(|e| PartError::Format(format!("manifest digest: {e}")))?;
    Ok(expected.as_slice() == got.as_slice())
}
