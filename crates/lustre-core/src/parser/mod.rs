//! Pure text parsers for Lustre parameter files.
//!
//! Every function takes file content as `&str` and knows nothing about
//! paths; the collector attaches path context to errors.

mod changelog;
mod histogram;
mod jobs;
mod stats;
mod units;
mod values;

pub use changelog::{ChangelogReader, ChangelogUsers, parse_changelog_users, split_changelog_targets};
pub use histogram::{Bucket, histogram_buckets};
pub use jobs::{JOB_OPERATIONS, job_id, job_io_value, job_operations, split_job_blocks};
pub use stats::{STATS_OPERATIONS, stats_field, stats_operations};
pub use units::convert_to_bytes;
pub use values::{lnet_stats_value, parse_health, parse_single};
