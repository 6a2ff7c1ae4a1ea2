use crate::error::{PartError, Result};
use crate::naming::parse_part_index;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartRef {
    pub index: u64,
    pub name: String,
}

/// Pick the parts for `prefix` out of `names` and order them by index.
///
/// The indices must be exactly `0..n`. No parts at all is a valid, empty set.
pub fn discover<I, S>(names: I, prefix: &str) -> Result<Vec<PartRef>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut refs: Vec<PartRef> = names
        .into_iter()
        .filter_map(|n| {
            let name = n.as_ref();
            parse_part_index(prefix, name).map(|index| PartRef {
                index,
                name: name.to_string(),
            })
        })
        .collect();
    refs.sort_by_key(|r| r.index);
    let indices: Vec<u64> = refs.iter().map(|r| r.index).collect();
    check_contiguous(&indices)?;
    Ok(refs)
}

/// `sorted` must already be in ascending order.
pub(crate) fn check_contiguous(sorted: &[u64]) -> Result<()> {
    for (expected, &index) in (0u64..).zip(sorted) {
        if index == expected {
            continue;
        }
        if index < expected {
            return Err(PartError::DuplicatePart { index });
        }
        return Err(PartError::ReassemblyGap {
            missing: expected,
            found: sorted.len(),
        });
    }
    Ok(())
}
