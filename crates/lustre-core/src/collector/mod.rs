//! Reading Lustre parameter trees into observations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Scraper                            │
//! │  ┌───────────────┐ ┌───────────────┐ ┌───────────────────┐  │
//! │  │ TemplateSource│ │ TemplateSource│ │  ChangelogSource  │  │
//! │  │ procfs/sysfs  │ │   procsys     │ │  lctl get_param   │  │
//! │  └───────┬───────┘ └───────┬───────┘ └─────────┬─────────┘  │
//! │          └────────┬────────┘                   │            │
//! │            ┌──────▼──────┐              ┌──────▼──────┐     │
//! │            │  resolver   │              │ TextSource  │     │
//! │            └──────┬──────┘              └─────────────┘     │
//! │            ┌──────▼──────┐                                  │
//! │            │  FileSystem │ (trait)                          │
//! │            └──────┬──────┘                                  │
//! └───────────────────┼─────────────────────────────────────────┘
//!          ┌──────────┼──────────┐
//!   ┌──────▼─────┐ ┌──▼───────┐ ┌▼──────────┐
//!   │   RealFs   │ │  MockFs  │ │ Scenarios │
//!   └────────────┘ └──────────┘ └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use lustre_core::collector::{MockFs, Scraper};
//! use lustre_core::config::Config;
//! use lustre_core::emitter::VecSink;
//!
//! let config = Config {
//!     lctl: lustre_core::config::LctlMode::Fixture("/lctl".into()),
//!     ..Config::default()
//! };
//! let scraper = Scraper::new(Arc::new(MockFs::ost_server()), &config).unwrap();
//! let sink = VecSink::new();
//! let reports = scraper.scrape(&sink);
//! assert!(reports.iter().all(|r| r.succeeded()));
//! assert!(!sink.is_empty());
//! ```

pub mod mock;
mod resolver;
mod scraper;
mod source;
pub mod traits;

pub use mock::MockFs;
pub use resolver::{ResolvedTarget, expand, resolve, resolve_instance};
pub use scraper::{Scraper, SourceReport};
pub use source::{ChangelogSource, Source, TemplateSource, extract};
pub use traits::{FileSystem, RealFs};
