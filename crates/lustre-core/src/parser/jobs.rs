//! Per-job accounting from `job_stats`.
//!
//! ```text
//! job_stats:
//! - job_id:          334
//!   snapshot_time:   1477432524
//!   write_bytes:     { samples:         126, unit: bytes, min: 1048576, max: 1048576, sum: 132120576 }
//!   punch:           { samples:          20, unit:  reqs }
//! ```
//!
//! Unlike the flat stats blocks, a value of exactly zero is never reported.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::StatsField;
use crate::error::ParseError;

use super::stats::find_record;
use super::values::parse_number;

static JOB_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)job_id:.*?$.*?(?:-|\z)").expect("job block regex"));

static JOB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)job_id:[ \t]*([\w.+ \t-]*)$").expect("job id regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]*\.[0-9]+|[0-9]+").expect("number regex"));

/// Operation records looked up in each job block, in emission order.
pub const JOB_OPERATIONS: &[&str] = &[
    "open",
    "close",
    "mknod",
    "link",
    "unlink",
    "mkdir",
    "rmdir",
    "rename",
    "getattr",
    "setattr",
    "getxattr",
    "setxattr",
    "statfs",
    "sync",
    "samedir_rename",
    "crossdir_rename",
    "punch",
    "destroy",
    "create",
    "get_info",
    "set_info",
    "quotactl",
];

/// Splits a `job_stats` file into one block per job.
pub fn split_job_blocks(content: &str) -> Vec<&str> {
    JOB_BLOCK.find_iter(content).map(|m| m.as_str()).collect()
}

/// Extracts the trimmed job id of a block.
pub fn job_id(block: &str) -> Result<String, ParseError> {
    JOB_ID
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ParseError::missing("job_id"))
}

/// Numbers of the `<key>:` record, in order of appearance.
fn record_numbers<'a>(block: &'a str, key: &str) -> Vec<&'a str> {
    find_record(block, key)
        .map(|line| {
            let rest = &line[key.len()..];
            NUMBER.find_iter(rest).map(|m| m.as_str()).collect()
        })
        .unwrap_or_default()
}

/// Extracts one IO field of a job block.
///
/// `Ok(None)` when the record is absent, the field has no job-stats
/// position, or the value is zero.
pub fn job_io_value(block: &str, field: StatsField) -> Result<Option<f64>, ParseError> {
    let descriptor = field.descriptor();
    let Some(index) = descriptor.job_index else {
        return Ok(None);
    };
    let Some(text) = record_numbers(block, descriptor.key).get(index).copied() else {
        return Ok(None);
    };
    let value = parse_number(text)?;
    Ok((value != 0.0).then_some(value))
}

/// Extracts every non-zero operation count of a job block.
pub fn job_operations(block: &str) -> Result<Vec<(&'static str, f64)>, ParseError> {
    let mut operations = Vec::new();
    for &operation in JOB_OPERATIONS {
        let Some(text) = record_numbers(block, operation).first().copied() else {
            continue;
        };
        let value = parse_number(text)?;
        if value != 0.0 {
            operations.push((operation, value));
        }
    }
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::scenarios::{MDT_JOB_STATS, OST_JOB_STATS};

    const ALL_OPS_BLOCK: &str = "job_id:          ALL
  snapshot_time:   1477432524
  read_bytes:      { samples:           0, unit: bytes, min:       0, max:       0, sum:               0 }
  write_bytes:     { samples:           0, unit: bytes, min:       0, max:       0, sum:               0 }
  open:            { samples:           1, unit:  reqs }
  close:           { samples:           2, unit:  reqs }
  mknod:           { samples:           3, unit:  reqs }
  link:            { samples:           4, unit:  reqs }
  unlink:          { samples:           5, unit:  reqs }
  mkdir:           { samples:           6, unit:  reqs }
  rmdir:           { samples:           7, unit:  reqs }
  rename:          { samples:           8, unit:  reqs }
  getattr:         { samples:           9, unit:  reqs }
  setattr:         { samples:          10, unit:  reqs }
  getxattr:        { samples:           0, unit:  reqs }
  setxattr:        { samples:           0, unit:  reqs }
";

    const SIX_OPS_BLOCK: &str = "job_id:          SIX
  snapshot_time:   1477432524
  getattr:         { samples:           0, unit:  reqs }
  setattr:         { samples:           1, unit:  reqs }
  punch:           { samples:          13, unit:  reqs }
  sync:            { samples:           0, unit:  reqs }
  destroy:         { samples:           4, unit:  reqs }
  create:          { samples:           2, unit:  reqs }
  statfs:          { samples:           8, unit:  reqs }
  get_info:        { samples:           0, unit:  reqs }
  set_info:        { samples:           0, unit:  reqs }
  quotactl:        { samples:          21, unit:  reqs }
";

    #[test]
    fn test_split_job_blocks() {
        let blocks = split_job_blocks(OST_JOB_STATS);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("job_id:          334"));
        assert!(blocks[1].starts_with("job_id:          dd.0"));

        let last_start = OST_JOB_STATS.rfind("job_id:").unwrap();
        assert_eq!(blocks[2], &OST_JOB_STATS[last_start..]);
    }

    #[test]
    fn test_split_job_blocks_empty() {
        assert!(split_job_blocks("job_stats:\n").is_empty());
        assert!(split_job_blocks("").is_empty());
    }

    #[test]
    fn test_job_id() {
        assert_eq!(job_id("job_id: 1234"), Ok("1234".to_string()));
        assert_eq!(job_id("job_id: ABCD"), Ok("ABCD".to_string()));
        assert_eq!(
            job_id("job_id:  abc .0123 .-_+ AB.1000  "),
            Ok("abc .0123 .-_+ AB.1000".to_string())
        );
        assert_eq!(job_id(""), Err(ParseError::missing("job_id")));
    }

    #[test]
    fn test_job_id_does_not_span_lines() {
        let block = "job_id:\n  snapshot_time:   1477432524\n";
        assert_eq!(job_id(block), Err(ParseError::missing("job_id")));

        let blocks = split_job_blocks(OST_JOB_STATS);
        assert_eq!(job_id(blocks[2]), Ok("mdtest.1000".to_string()));
    }

    #[test]
    fn test_job_io_single_observation() {
        let blocks = split_job_blocks(OST_JOB_STATS);
        assert_eq!(
            job_io_value(blocks[0], StatsField::WriteTotal),
            Ok(Some(132120576.0))
        );
        assert_eq!(job_io_value(blocks[0], StatsField::WriteSamples), Ok(Some(126.0)));
        assert_eq!(job_io_value(blocks[0], StatsField::WriteMinimum), Ok(Some(1048576.0)));
        assert_eq!(job_io_value(blocks[1], StatsField::ReadMinimum), Ok(Some(4096.0)));
    }

    #[test]
    fn test_job_io_zero_dropped() {
        let blocks = split_job_blocks(OST_JOB_STATS);
        assert_eq!(job_io_value(blocks[0], StatsField::ReadSamples), Ok(None));
        assert_eq!(job_io_value(blocks[0], StatsField::ReadTotal), Ok(None));
    }

    #[test]
    fn test_job_io_unknown_field() {
        let blocks = split_job_blocks(OST_JOB_STATS);
        assert_eq!(job_io_value(blocks[0], StatsField::PhysicalPages), Ok(None));
        assert_eq!(job_io_value(SIX_OPS_BLOCK, StatsField::ReadTotal), Ok(None));
    }

    #[test]
    fn test_job_operations_all_nonzero() {
        let operations = job_operations(ALL_OPS_BLOCK).unwrap();
        assert_eq!(operations.len(), 10);
        assert_eq!(operations[0], ("open", 1.0));
        assert_eq!(operations[3], ("link", 4.0));
        assert_eq!(operations[4], ("unlink", 5.0));
        assert_eq!(operations[9], ("setattr", 10.0));
    }

    #[test]
    fn test_job_operations_catalog_order() {
        let operations = job_operations(SIX_OPS_BLOCK).unwrap();
        assert_eq!(
            operations,
            vec![
                ("setattr", 1.0),
                ("statfs", 8.0),
                ("punch", 13.0),
                ("destroy", 4.0),
                ("create", 2.0),
                ("quotactl", 21.0),
            ]
        );
    }

    #[test]
    fn test_mdt_job_operations() {
        let blocks = split_job_blocks(MDT_JOB_STATS);
        assert_eq!(blocks.len(), 1);
        assert_eq!(job_id(blocks[0]), Ok("cp.0".to_string()));
        assert_eq!(
            job_operations(blocks[0]).unwrap(),
            vec![("open", 10.0), ("close", 10.0), ("mkdir", 1.0), ("getattr", 12.0)]
        );
    }
}
