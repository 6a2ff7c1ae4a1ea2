use std::collections::BTreeMap;

use crate::error::Result;
use crate::reassemble::source::PartSource;

/// Parts already held in memory, keyed by file name.
#[derive(Clone, Debug, Default)]
pub struct MemPartSource {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemPartSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }
}

impl FromIterator<(String, Vec<u8>)> for MemPartSource {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl PartSource for MemPartSource {
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn fetch(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no part named {name}"))
        })
    }
}
