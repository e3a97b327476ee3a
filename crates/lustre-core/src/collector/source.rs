//! Source families: one update pass reads a whole family and emits
//! observations into a sink.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::{self, Format, MetricTemplate, MetricType, SourceKind, StatsValue};
use crate::collector::resolver::{ResolvedTarget, resolve};
use crate::collector::traits::FileSystem;
use crate::config::Config;
use crate::emitter::{Emitter, Observation, Sink};
use crate::error::{CollectError, ParseError};
use crate::lctl::TextSource;
use crate::parser;

/// A family of metrics updated as one unit.
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs one full pass. The first failing file aborts the pass.
    fn update(&self, sink: &dyn Sink) -> Result<(), CollectError>;
}

/// Template-driven family reading procfs, procsys or sysfs.
pub struct TemplateSource<F: FileSystem> {
    kind: SourceKind,
    fs: Arc<F>,
    base: PathBuf,
    templates: Vec<MetricTemplate>,
}

impl<F: FileSystem> TemplateSource<F> {
    pub fn new(kind: SourceKind, fs: Arc<F>, config: &Config) -> Self {
        Self {
            kind,
            fs,
            base: kind.base_path(config),
            templates: catalog::templates(kind, &config.levels),
        }
    }

    pub fn templates(&self) -> &[MetricTemplate] {
        &self.templates
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl<F: FileSystem> Source for TemplateSource<F> {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn update(&self, sink: &dyn Sink) -> Result<(), CollectError> {
        for template in &self.templates {
            let targets = resolve(self.fs.as_ref(), &self.base, template)?;
            if targets.is_empty() {
                trace!("{}: no match for {}/{}", self.kind.name(), template.path, template.filename);
                continue;
            }
            for target in targets {
                let content = self
                    .fs
                    .read_to_string(&target.path)
                    .map_err(|e| CollectError::unreadable(&target.path, e))?;
                extract(template, &target, &content, sink)?;
            }
        }
        Ok(())
    }
}

/// Parses `content` according to the template's format and emits the values.
///
/// Parse failures carry the target's path.
pub fn extract(
    template: &MetricTemplate,
    target: &ResolvedTarget,
    content: &str,
    sink: &dyn Sink,
) -> Result<(), CollectError> {
    // mdc/<instance>/rpc_stats -> "mdc"
    let kind = match template.format {
        Format::Histogram { typed: true, .. } => Some(device_type(&target.path)?),
        _ => None,
    };
    emit_values(template, target, content, kind.as_deref(), sink)
        .map_err(|e| CollectError::parse(&target.path, e))
}

fn emit_values(
    template: &MetricTemplate,
    target: &ResolvedTarget,
    content: &str,
    kind: Option<&str>,
    sink: &dyn Sink,
) -> Result<(), ParseError> {
    let emitter = Emitter::new(sink, template, &target.instance);

    match template.format {
        Format::Single => emitter.emit(&[], parser::parse_single(content)?),
        Format::Health => emitter.emit(&[], parser::parse_health(content)),
        Format::LnetStats(field) => emitter.emit(&[], parser::lnet_stats_value(content, field)?),
        Format::Stats(StatsValue::Field(field)) => {
            if let Some(value) = parser::stats_field(content, field)? {
                emitter.emit(&[], value);
            }
        }
        Format::Stats(StatsValue::Operations) => {
            for (operation, value) in parser::stats_operations(content)? {
                emitter.emit(&[operation], value);
            }
        }
        Format::JobStats(value) => {
            for block in parser::split_job_blocks(content) {
                let job = parser::job_id(block)?;
                match value {
                    StatsValue::Field(field) => {
                        if let Some(v) = parser::job_io_value(block, field)? {
                            emitter.emit(&[&job], v);
                        }
                    }
                    StatsValue::Operations => {
                        for (operation, v) in parser::job_operations(block)? {
                            emitter.emit(&[&job, operation], v);
                        }
                    }
                }
            }
        }
        Format::Histogram { section, .. } => {
            for bucket in parser::histogram_buckets(content, section)? {
                let mut sides = vec![("read", bucket.read)];
                if let Some(write) = bucket.write {
                    sides.push(("write", write));
                }
                for (operation, value) in sides {
                    match kind {
                        Some(kind) => emitter.emit(&[operation, &bucket.size, kind], value),
                        None => emitter.emit(&[operation, &bucket.size], value),
                    }
                }
            }
        }
    }
    Ok(())
}

/// The path element two levels above the file, with the same length rules
/// as [`resolve_instance`](crate::collector::resolve_instance) at depth 1.
fn device_type(path: &Path) -> Result<String, CollectError> {
    let text = path.to_string_lossy();
    let elements: Vec<&str> = text.split('/').collect();
    match elements.len().checked_sub(3).map(|i| elements[i]) {
        Some(kind) if !kind.is_empty() => Ok(kind.to_string()),
        _ => Err(CollectError::InstancePath {
            path: path.to_path_buf(),
            depth: 1,
        }),
    }
}

/// MDT changelog users, read through `lctl`.
pub struct ChangelogSource {
    text: Box<dyn TextSource>,
}

impl ChangelogSource {
    pub fn new(text: Box<dyn TextSource>) -> Self {
        Self { text }
    }
}

impl Source for ChangelogSource {
    fn name(&self) -> &'static str {
        "lctl"
    }

    fn update(&self, sink: &dyn Sink) -> Result<(), CollectError> {
        let Some(text) = self.text.fetch()? else {
            return Ok(());
        };

        for block in parser::split_changelog_targets(&text) {
            let users = parser::parse_changelog_users(block).map_err(CollectError::Changelog)?;
            debug!(
                "changelog {}: index {}, {} readers",
                users.target,
                users.current_index,
                users.readers.len()
            );

            let base = vec![
                ("component", "mdt".to_string()),
                ("target", users.target.clone()),
            ];
            sink.observe(Observation {
                name: format!("{}_changelog_current_index", catalog::NAMESPACE),
                help: "Changelog current index.",
                metric_type: MetricType::Counter,
                labels: base.clone(),
                value: users.current_index,
            });

            for reader in &users.readers {
                let mut labels = base.clone();
                labels.push(("id", reader.id.clone()));
                sink.observe(Observation {
                    name: format!("{}_changelog_user_index", catalog::NAMESPACE),
                    help: "Index of registered changelog user.",
                    metric_type: MetricType::Counter,
                    labels: labels.clone(),
                    value: reader.index,
                });
                sink.observe(Observation {
                    name: format!("{}_changelog_user_idle_time", catalog::NAMESPACE),
                    help: "Idle time in seconds of registered changelog user.",
                    metric_type: MetricType::Gauge,
                    labels,
                    value: reader.idle_seconds,
                });
            }
        }
        Ok(())
    }
}
