//! File-name convention shared by the splitter and the reassembler.
//!
//! A part is named `<prefix><index>` with a plain decimal index: no padding,
//! no separator, no extension. Names therefore do not sort by string order
//! once there are ten or more parts; callers order by [`parse_part_index`].

use std::ffi::OsStr;

/// Name of the part file holding index `index`.
pub fn part_name(prefix: &str, index: u64) -> String {
    format!("{prefix}{index}")
}

/// Parse the numeric suffix of a part name.
///
/// Returns `None` unless `name` is `prefix` followed by canonical decimal
/// digits. `prefix01` is rejected so that it cannot alias `prefix1`.
pub fn parse_part_index(prefix: &str, name: &str) -> Option<u64> {
    let suffix = name.strip_prefix(prefix)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.len() > 1 && suffix.starts_with('0') {
        return None;
    }
    suffix.parse().ok()
}

/// Any file carrying the prefix is cleared before a new split, parts or not.
///
/// Compared on raw bytes so names that are not valid UTF-8 still match.
pub fn is_stale_candidate(prefix: &str, name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(prefix.as_bytes())
}
