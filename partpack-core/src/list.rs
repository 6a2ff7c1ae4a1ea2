use crate::domain::PartRow;
use crate::error::{PartError, Result};
use crate::reassemble::discover::discover;
use crate::reassemble::source::PartSource;

/// Discovered parts with their sizes, in index order. Fails on a gap.
pub fn list_parts(source: &dyn PartSource, prefix: &str) -> Result<Vec<PartRow>> {
    let refs = discover(source.list_names()?, prefix)?;
    let mut rows = Vec::with_capacity(refs.len());
    for r in refs {
        let size = source.size(&r.name).map_err(|e| PartError::PartFetch {
            name: r.name.clone(),
            source: e,
        })?;
        rows.push(PartRow {
            index: r.index,
            name: r.name,
            size,
        });
    }
    Ok(rows)
}
