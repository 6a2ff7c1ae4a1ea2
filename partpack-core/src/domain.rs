use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartRow {
    pub index: u64,
    pub name: String,
    pub size: u64,
}

#[derive(Clone, Debug)]
pub struct SplitReport {
    pub total_size: u64,
    pub chunk_size: u64,
    pub parts: Vec<PartRow>,
    pub manifest: Option<PathBuf>,
    /// Files carrying the prefix that were removed before writing.
    pub removed_stale: usize,
}

impl SplitReport {
    pub fn num_chunks(&self) -> u64 {
        self.parts.len() as u64
    }
}

#[derive(Clone, Debug)]
pub struct ReassemblyReport {
    pub parts: u64,
    pub total_size: u64,
    pub blake3: [u8; 32],
    pub manifest_checked: bool,
}
