//! Lustre metrics extraction.
//!
//! A static [`catalog`] of metric templates is resolved against the live
//! procfs and sysfs trees, each matched file is parsed by [`parser`], and
//! values are handed to an [`emitter::Sink`] as labelled observations.

pub mod catalog;
pub mod collector;
pub mod config;
pub mod emitter;
pub mod error;
pub mod lctl;
pub mod parser;

pub use catalog::{MetricTemplate, MetricType, SourceKind};
pub use collector::{FileSystem, MockFs, RealFs, Scraper, SourceReport};
pub use config::{Config, EnableLevel, LctlMode, Levels};
pub use emitter::{Observation, Sink, VecSink};
pub use error::{CollectError, ParseError};
