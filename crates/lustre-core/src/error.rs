//! Error types shared by the parsers and the collector.

use std::path::PathBuf;

/// Failure of a pure text parser.
///
/// Parsers never see paths; the collector attaches the path when it wraps
/// a `ParseError` into a [`CollectError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A field was located but is not a valid float.
    #[error("unparseable numeric value {text:?}")]
    UnparseableNumeric { text: String },
    /// A mandatory piece of the text is absent (job id, changelog target, ...).
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

impl ParseError {
    pub fn numeric(text: impl Into<String>) -> Self {
        ParseError::UnparseableNumeric { text: text.into() }
    }

    pub fn missing(field: &'static str) -> Self {
        ParseError::MissingField { field }
    }
}

/// Error type for a source family's update pass.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// I/O failure opening or reading a resolved path.
    #[error("failed to read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its content could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    /// Text from the changelog source could not be parsed.
    #[error("failed to parse changelog output: {0}")]
    Changelog(#[source] ParseError),
    /// A glob pattern in the catalog is malformed.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// A resolved path has fewer segments than the template depth requires.
    #[error("cannot derive instance name from {path} at depth {depth}")]
    InstancePath { path: PathBuf, depth: usize },
    /// The external parameter command is unavailable or failed.
    #[error("command {program} failed: {reason}")]
    Command { program: String, reason: String },
}

impl CollectError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::FileUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        CollectError::Parse {
            path: path.into(),
            source,
        }
    }
}
