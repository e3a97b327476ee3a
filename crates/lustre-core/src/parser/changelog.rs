//! `lctl get_param mdd.*-*.changelog_users` output.
//!
//! ```text
//! mdd.lustrefs-MDT0000.changelog_users=
//! current index: 34
//! ID    index (idle seconds)
//! cl1   32 (1234)
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

use super::values::parse_number;

static TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mdd\.([\w-]+-MDT\d+)\.changelog_users=").expect("changelog target regex")
});

static CURRENT_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"current index: (\d+)").expect("changelog index regex"));

static READER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(cl\d+)\s+(\d+) \((\d+)\)").expect("changelog reader regex"));

/// A registered changelog consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogReader {
    pub id: String,
    pub index: f64,
    pub idle_seconds: f64,
}

/// Changelog state of one MDT.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogUsers {
    pub target: String,
    pub current_index: f64,
    pub readers: Vec<ChangelogReader>,
}

/// Parses the changelog block of a single MDT.
///
/// The target line and the current index are mandatory; an empty reader
/// list is valid.
pub fn parse_changelog_users(content: &str) -> Result<ChangelogUsers, ParseError> {
    let target = TARGET
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ParseError::missing("changelog target"))?
        .as_str()
        .to_string();
    let current_index = CURRENT_INDEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ParseError::missing("current index"))?;
    let current_index = parse_number(current_index.as_str())?;

    let mut readers = Vec::new();
    for caps in READER.captures_iter(content) {
        readers.push(ChangelogReader {
            id: caps[1].to_string(),
            index: parse_number(&caps[2])?,
            idle_seconds: parse_number(&caps[3])?,
        });
    }

    Ok(ChangelogUsers {
        target,
        current_index,
        readers,
    })
}

/// Splits multi-MDT output at each target line.
///
/// Text before the first target line is dropped. Output without any target
/// line is returned whole so that parsing reports the missing target.
pub fn split_changelog_targets(content: &str) -> Vec<&str> {
    let starts: Vec<usize> = TARGET.find_iter(content).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![content];
    }
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            &content[start..end]
        })
        .collect()
}
