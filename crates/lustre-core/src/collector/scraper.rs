//! Runs every enabled source family once per scrape.
//!
//! Families run concurrently on scoped threads and share one sink. A failing
//! family is reported and logged without affecting the others.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::catalog::SourceKind;
use crate::collector::source::{ChangelogSource, Source, TemplateSource};
use crate::collector::traits::FileSystem;
use crate::config::{Config, EnableLevel, LctlMode};
use crate::emitter::Sink;
use crate::error::CollectError;
use crate::lctl::{CHANGELOG_PARAM, FixtureFile, LctlCommand};

/// Outcome of one family within a scrape.
#[derive(Debug)]
pub struct SourceReport {
    pub name: &'static str,
    pub duration: Duration,
    pub result: Result<(), CollectError>,
}

impl SourceReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// The set of source families configured for this node.
pub struct Scraper {
    sources: Vec<Box<dyn Source>>,
}

impl Scraper {
    /// Builds the families enabled by `config`.
    ///
    /// Template families left without templates are skipped. The changelog
    /// family needs `mdt` at the extended level; in command mode a missing
    /// `lctl` binary is an error.
    pub fn new<F: FileSystem + 'static>(fs: Arc<F>, config: &Config) -> Result<Self, CollectError> {
        let mut sources: Vec<Box<dyn Source>> = Vec::new();

        for kind in SourceKind::ALL {
            let source = TemplateSource::new(kind, fs.clone(), config);
            if source.templates().is_empty() {
                debug!("{} source disabled: no templates", kind.name());
                continue;
            }
            debug!(
                "{} source: {} templates under {}",
                kind.name(),
                source.templates().len(),
                source.base().display()
            );
            sources.push(Box::new(source));
        }

        if config.levels.mdt == EnableLevel::Extended {
            let changelog = match &config.lctl {
                LctlMode::Command => ChangelogSource::new(Box::new(LctlCommand::detect(CHANGELOG_PARAM)?)),
                LctlMode::Fixture(root) => {
                    ChangelogSource::new(Box::new(FixtureFile::new(fs.clone(), root, CHANGELOG_PARAM)))
                }
            };
            sources.push(Box::new(changelog));
        }

        Ok(Self { sources })
    }

    /// Uses an explicit list of sources.
    pub fn with_sources(sources: Vec<Box<dyn Source>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Updates every family into `sink`, returning one report per family in
    /// registration order.
    pub fn scrape(&self, sink: &dyn Sink) -> Vec<SourceReport> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .sources
                .iter()
                .map(|source| {
                    scope.spawn(move || {
                        let start = Instant::now();
                        let result = source.update(sink);
                        let duration = start.elapsed();
                        match &result {
                            Ok(()) => debug!("{} source updated in {:?}", source.name(), duration),
                            Err(e) => error!(source = source.name(), error = %e, "source update failed"),
                        }
                        SourceReport {
                            name: source.name(),
                            duration,
                            result,
                        }
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::mock::scenarios::CHANGELOG_USERS;
    use crate::config::Levels;
    use crate::emitter::VecSink;
    use std::path::PathBuf;

    fn fixture_config(levels: Levels) -> Config {
        Config {
            levels,
            lctl: LctlMode::Fixture(PathBuf::from("/lctl")),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_families() {
        let scraper = Scraper::new(Arc::new(MockFs::new()), &fixture_config(Levels::default())).unwrap();
        assert_eq!(scraper.source_names(), vec!["procfs", "procsys", "sysfs", "lctl"]);
    }

    #[test]
    fn test_disabled_components_drop_families() {
        let levels = Levels {
            health: EnableLevel::Core,
            ..Levels::none()
        };
        let scraper = Scraper::new(Arc::new(MockFs::new()), &fixture_config(levels)).unwrap();
        assert_eq!(scraper.source_names(), vec!["sysfs"]);
    }

    #[test]
    fn test_changelog_needs_extended_mdt() {
        let levels = Levels {
            mdt: EnableLevel::Core,
            ..Levels::none()
        };
        let scraper = Scraper::new(Arc::new(MockFs::new()), &fixture_config(levels)).unwrap();
        assert_eq!(scraper.source_names(), vec!["procfs"]);
    }

    #[test]
    fn test_scrape_mdt_server() {
        let mut fs = MockFs::mdt_server();
        fs.add_file("/lctl/mdd/lustrefs-MDT0000/changelog_users", CHANGELOG_USERS);
        let levels = Levels {
            mdt: EnableLevel::Extended,
            health: EnableLevel::Core,
            ..Levels::none()
        };
        let scraper = Scraper::new(Arc::new(fs), &fixture_config(levels)).unwrap();

        let sink = VecSink::new();
        let reports = scraper.scrape(&sink);
        assert!(reports.iter().all(SourceReport::succeeded));

        let observations = sink.into_observations();
        let unlink: Vec<_> = observations
            .iter()
            .filter(|o| o.name == "lustre_stats_total" && o.label("operation") == Some("unlink"))
            .collect();
        assert_eq!(unlink.len(), 1);
        assert_eq!(unlink[0].value, 87.0);
        assert_eq!(unlink[0].label("component"), Some("mdt"));

        let jobs: Vec<_> = observations
            .iter()
            .filter(|o| o.name == "lustre_job_stats_total")
            .collect();
        assert_eq!(jobs.len(), 4);
        assert!(jobs.iter().all(|o| o.label("jobid") == Some("cp.0")));

        assert!(observations.iter().any(|o| o.name == "lustre_changelog_current_index"));
        assert!(observations.iter().any(|o| o.name == "lustre_health_check" && o.value == 1.0));
    }

    #[test]
    fn test_failing_family_does_not_stop_others() {
        let levels = Levels {
            ost: EnableLevel::Core,
            health: EnableLevel::Core,
            ..Levels::none()
        };
        let scraper = Scraper::new(Arc::new(MockFs::corrupt_ost()), &fixture_config(levels)).unwrap();

        let sink = VecSink::new();
        let reports = scraper.scrape(&sink);
        assert_eq!(reports.len(), 2);

        let procfs = reports.iter().find(|r| r.name == "procfs").unwrap();
        assert!(matches!(procfs.result, Err(CollectError::Parse { .. })));
        let sysfs = reports.iter().find(|r| r.name == "sysfs").unwrap();
        assert!(sysfs.succeeded());

        let observations = sink.into_observations();
        assert!(observations.iter().any(|o| o.name == "lustre_health_check"));
    }

    #[test]
    fn test_with_sources_empty() {
        let scraper = Scraper::with_sources(Vec::new());
        let sink = VecSink::new();
        assert!(scraper.scrape(&sink).is_empty());
        assert!(sink.is_empty());
    }
}
