//! Flat stats blocks: `stats`, `md_stats` and `encrypt_page_pools`.
//!
//! ```text
//! snapshot_time             1477432524.123456 secs.usecs
//! read_bytes                1 samples [bytes] 1048576 1048576 1048576
//! statfs                    314187 samples [reqs]
//! ```

use crate::catalog::StatsField;
use crate::error::ParseError;

use super::values::parse_number;

/// Operation counters looked up in `stats` and `md_stats`, in emission order.
pub const STATS_OPERATIONS: &[&str] = &[
    "open",
    "close",
    "getattr",
    "setattr",
    "getxattr",
    "setxattr",
    "statfs",
    "seek",
    "readdir",
    "truncate",
    "alloc_inode",
    "removexattr",
    "unlink",
    "inode_permission",
    "create",
    "get_info",
    "set_info_async",
    "connect",
    "ping",
    "mknod",
    "link",
    "mkdir",
    "rmdir",
    "rename",
    "sync",
    "samedir_rename",
    "crossdir_rename",
];

/// Finds the line whose first token is `key`.
///
/// Returns the line with leading whitespace removed. A key ending in `:`
/// matches as a plain prefix; otherwise the key must be followed by
/// whitespace, a colon or the end of the line, so `link` never matches
/// `unlink` or `link_count`.
pub(crate) fn find_record<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().map(str::trim_start).find(|line| {
        let Some(rest) = line.strip_prefix(key) else {
            return false;
        };
        key.ends_with(':')
            || rest.is_empty()
            || rest.starts_with(|c: char| c.is_whitespace() || c == ':')
    })
}

/// Extracts one field of a flat stats block.
///
/// `Ok(None)` when the record is absent.
pub fn stats_field(content: &str, field: StatsField) -> Result<Option<f64>, ParseError> {
    let descriptor = field.descriptor();
    let Some(line) = find_record(content, descriptor.key) else {
        return Ok(None);
    };
    let text = line
        .split_whitespace()
        .nth(descriptor.split_index)
        .ok_or_else(|| ParseError::missing(descriptor.key))?;
    parse_number(text).map(Some)
}

/// Extracts every known operation counter present in the block.
///
/// Zero counts are kept.
pub fn stats_operations(content: &str) -> Result<Vec<(&'static str, f64)>, ParseError> {
    let mut operations = Vec::new();
    for &operation in STATS_OPERATIONS {
        let Some(line) = find_record(content, operation) else {
            continue;
        };
        let text = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ParseError::missing("operation count"))?;
        operations.push((operation, parse_number(text)?));
    }
    Ok(operations)
}
