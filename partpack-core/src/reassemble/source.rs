use crate::error::Result;

/// Where the reassembler finds parts: a build directory, a download cache,
/// a set of responses already held in memory.
pub trait PartSource: Send + Sync {
    /// Every file name the source can see. Non-part names are filtered later.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Bytes of one named file. `NotFound` means the file is absent.
    fn fetch(&self, name: &str) -> std::io::Result<Vec<u8>>;

    fn size(&self, name: &str) -> std::io::Result<u64> {
        Ok(self.fetch(name)?.len() as u64)
    }
}
