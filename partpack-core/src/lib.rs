#![forbid(unsafe_code)]

pub mod deploy;
pub mod domain;
pub mod error;
pub mod list;
pub mod naming;
pub mod options;
pub mod plan;

pub mod container {
    pub mod manifest;
}

pub mod split {
    pub mod stale;
    pub mod writer;
}

pub mod reassemble {
    pub mod assemble;
    pub mod discover;
    pub mod source;
    pub mod source_fs;
    pub mod source_mem;
}

#[cfg(test)]
mod proptests;

// Re-exports: stable API surface
pub use domain::{PartRow, ReassemblyReport, SplitReport};
pub use error::{PartError, Result};
pub use list::list_parts;
pub use options::{ReassembleOptions, SplitOptions};
pub use reassemble::assemble::{assemble, reassemble, reassemble_into, verify};
pub use reassemble::source::PartSource;
pub use reassemble::source_fs::FsPartSource;
pub use reassemble::source_mem::MemPartSource;
pub use split::writer::{split, split_file};
