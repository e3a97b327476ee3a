//! Mock filesystem and canned Lustre trees for tests.

mod filesystem;
pub mod scenarios;

pub use filesystem::MockFs;
