use std::ops::Range;

use crate::error::{PartError, Result};

/// How an artifact of `total_size` bytes divides into parts of at most
/// `chunk_size` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartPlan {
    pub total_size: u64,
    pub chunk_size: u64,
}

impl PartPlan {
    pub fn new(total_size: u64, chunk_size: u64) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PartError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            total_size,
            chunk_size,
        })
    }

    /// `ceil(total_size / chunk_size)`; zero for an empty artifact.
    pub fn num_parts(&self) -> u64 {
        self.total_size.div_ceil(self.chunk_size)
    }

    /// Byte range of part `index` within the artifact.
    pub fn range(&self, index: u64) -> Range<u64> {
        let start = index.saturating_mul(self.chunk_size).min(self.total_size);
        let end = start.saturating_add(self.chunk_size).min(self.total_size);
        start..end
    }

    pub fn part_len(&self, index: u64) -> u64 {
        let r = self.range(index);
        r.end - r.start
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        (0..self.num_parts()).map(move |i| self.range(i))
    }
}
