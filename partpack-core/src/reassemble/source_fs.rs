use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::reassemble::source::PartSource;

/// Parts sitting in one directory, as the splitter left them.
pub struct FsPartSource {
    dir: PathBuf,
}

impl FsPartSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PartSource for FsPartSource {
    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        // Every entry, whatever its type: a part that cannot be read must
        // fail in `fetch`, not vanish from the set.
        for e in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let e = e.map_err(std::io::Error::other)?;
            if let Some(name) = e.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn fetch(&self, name: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.dir.join(name))
    }

    fn size(&self, name: &str) -> std::io::Result<u64> {
        Ok(std::fs::metadata(self.dir.join(name))?.len())
    }
}
