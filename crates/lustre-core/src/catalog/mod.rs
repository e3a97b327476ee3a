//! Declarative metric templates.
//!
//! A template names one exported metric and declares where its values live
//! (path pattern + filename below a source root) and how the file is laid
//! out ([`Format`]). Nothing about a file's format is guessed at runtime.
//!
//! Templates are grouped by [`Component`] and [`SourceKind`]; the tables
//! themselves live in `tables.rs`.

mod tables;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Config, EnableLevel, Levels};

/// Prefix of every exported metric name.
pub const NAMESPACE: &str = "lustre";

/// Lustre role a metric belongs to. Rendered as the `component` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Ost,
    Mdt,
    Mgs,
    Mds,
    Client,
    Generic,
    Lnet,
    Health,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Ost => "ost",
            Component::Mdt => "mdt",
            Component::Mgs => "mgs",
            Component::Mds => "mds",
            Component::Client => "client",
            Component::Generic => "generic",
            Component::Lnet => "lnet",
            Component::Health => "health",
        }
    }

    /// Enable level configured for this component.
    pub fn level(self, levels: &Levels) -> EnableLevel {
        match self {
            Component::Ost => levels.ost,
            Component::Mdt => levels.mdt,
            Component::Mgs => levels.mgs,
            Component::Mds => levels.mds,
            Component::Client => levels.client,
            Component::Generic => levels.generic,
            Component::Lnet => levels.lnet,
            Component::Health => levels.health,
        }
    }
}

/// Exposition type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Counter,
    Gauge,
    Untyped,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Untyped => "untyped",
        }
    }
}

/// Minimal (`Core`) vs full (`Extended`) exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Core,
    Extended,
}

impl Priority {
    /// Whether a template of this priority is exported at `level`.
    pub fn included_at(self, level: EnableLevel) -> bool {
        match level {
            EnableLevel::Disabled => false,
            EnableLevel::Core => self == Priority::Core,
            EnableLevel::Extended => true,
        }
    }
}

/// Field of a flat stats block selected by an IO-style template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    ReadSamples,
    ReadMinimum,
    ReadMaximum,
    ReadTotal,
    WriteSamples,
    WriteMinimum,
    WriteMaximum,
    WriteTotal,
    PhysicalPages,
    PagesPerPool,
    MaxPages,
    MaxPools,
    TotalPages,
    TotalFree,
    MaxPagesReached,
    Grows,
    GrowsFailure,
    Shrinks,
    CacheAccess,
    CacheMissing,
    LowFreeMark,
    MaxWaitqueueDepth,
    OutOfMem,
}

/// Where a [`StatsField`] lives inside its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Leading key of the record line.
    pub key: &'static str,
    /// Index into the whitespace-split line of a `stats` file.
    pub split_index: usize,
    /// Index into the numbers of a `job_stats` record. `None` when the field
    /// never appears in job_stats.
    pub job_index: Option<usize>,
}

impl StatsField {
    pub fn descriptor(self) -> FieldDescriptor {
        // stats line: {name} {samples} 'samples' [{unit}] {min} {max} {sum}
        //             [0]    [1]       [2]       [3]      [4]   [5]   [6]
        // job record: {name}: { samples: N, unit: U, min: N, max: N, sum: N }
        const fn io(key: &'static str, split_index: usize, job_index: usize) -> FieldDescriptor {
            FieldDescriptor {
                key,
                split_index,
                job_index: Some(job_index),
            }
        }
        const fn pool(key: &'static str, split_index: usize) -> FieldDescriptor {
            FieldDescriptor {
                key,
                split_index,
                job_index: None,
            }
        }

        match self {
            StatsField::ReadSamples => io("read_bytes", 1, 0),
            StatsField::ReadMinimum => io("read_bytes", 4, 1),
            StatsField::ReadMaximum => io("read_bytes", 5, 2),
            StatsField::ReadTotal => io("read_bytes", 6, 3),
            StatsField::WriteSamples => io("write_bytes", 1, 0),
            StatsField::WriteMinimum => io("write_bytes", 4, 1),
            StatsField::WriteMaximum => io("write_bytes", 5, 2),
            StatsField::WriteTotal => io("write_bytes", 6, 3),
            StatsField::PhysicalPages => pool("physical pages:", 2),
            StatsField::PagesPerPool => pool("pages per pool:", 3),
            StatsField::MaxPages => pool("max pages:", 2),
            StatsField::MaxPools => pool("max pools:", 2),
            StatsField::TotalPages => pool("total pages:", 2),
            StatsField::TotalFree => pool("total free:", 2),
            StatsField::MaxPagesReached => pool("max pages reached:", 3),
            StatsField::Grows => pool("grows:", 1),
            StatsField::GrowsFailure => pool("grows failure:", 2),
            StatsField::Shrinks => pool("shrinks:", 1),
            StatsField::CacheAccess => pool("cache access:", 2),
            StatsField::CacheMissing => pool("cache missing:", 2),
            StatsField::LowFreeMark => pool("low free mark:", 3),
            StatsField::MaxWaitqueueDepth => pool("max waitqueue depth:", 3),
            StatsField::OutOfMem => pool("out of mem:", 3),
        }
    }
}

/// What a stats-style template extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsValue {
    /// One field of one record.
    Field(StatsField),
    /// Every known operation counter, one observation per operation.
    Operations,
}

/// Named section of a `brw_stats` or `rpc_stats` histogram file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PagesPerBulkRw,
    DiscontiguousPages,
    DiskIosInFlight,
    IoTime,
    DiskIoSize,
    PagesPerRpc,
    RpcsInFlight,
    Offset,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::PagesPerBulkRw,
        Section::DiscontiguousPages,
        Section::DiskIosInFlight,
        Section::IoTime,
        Section::DiskIoSize,
        Section::PagesPerRpc,
        Section::RpcsInFlight,
        Section::Offset,
    ];

    /// Title line the section starts with.
    pub fn title(self) -> &'static str {
        match self {
            Section::PagesPerBulkRw => "pages per bulk r/w",
            Section::DiscontiguousPages => "discontiguous pages",
            Section::DiskIosInFlight => "disk I/Os in flight",
            Section::IoTime => "I/O time",
            Section::DiskIoSize => "disk I/O size",
            Section::PagesPerRpc => "pages per rpc",
            Section::RpcsInFlight => "rpcs in flight",
            Section::Offset => "offset",
        }
    }

    /// Whether size labels are byte sizes (`4K`, `1M`) to be normalized.
    pub fn byte_sized(self) -> bool {
        matches!(self, Section::DiskIoSize)
    }

    /// Size labels always exported for this section, in raw (unconverted) form.
    ///
    /// The kernel stops printing rows after the last non-empty bucket, so
    /// buckets above it have to be filled in. Linear sections have no fixed
    /// domain and return an empty slice.
    pub fn domain(self) -> &'static [&'static str] {
        const PAGES: &[&str] = &["1", "2", "4", "8", "16", "32", "64", "128", "256"];
        const IO_SIZES: &[&str] = &[
            "4K", "8K", "16K", "32K", "64K", "128K", "256K", "512K", "1M",
        ];
        match self {
            Section::PagesPerBulkRw | Section::PagesPerRpc => PAGES,
            Section::DiskIoSize => IO_SIZES,
            Section::DiscontiguousPages
            | Section::DiskIosInFlight
            | Section::IoTime
            | Section::RpcsInFlight
            | Section::Offset => &[],
        }
    }
}

/// Column of the LNET `stats` counter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LnetField {
    Allocated,
    Maximum,
    Errors,
    SendCount,
    ReceiveCount,
    RouteCount,
    DropCount,
    SendBytes,
    ReceiveBytes,
    RouteBytes,
    DropBytes,
}

impl LnetField {
    pub fn index(self) -> usize {
        match self {
            LnetField::Allocated => 0,
            LnetField::Maximum => 1,
            LnetField::Errors => 2,
            LnetField::SendCount => 3,
            LnetField::ReceiveCount => 4,
            LnetField::RouteCount => 5,
            LnetField::DropCount => 6,
            LnetField::SendBytes => 7,
            LnetField::ReceiveBytes => 8,
            LnetField::RouteBytes => 9,
            LnetField::DropBytes => 10,
        }
    }
}

/// Declared layout of a template's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One number.
    Single,
    /// `healthy` sentinel, exported as 1 or 0.
    Health,
    /// `stats`, `md_stats` and `encrypt_page_pools` blocks.
    Stats(StatsValue),
    /// Per-job records of a `job_stats` file.
    JobStats(StatsValue),
    /// Histogram section; `typed` adds the `type` label (mdc vs osc).
    Histogram { section: Section, typed: bool },
    /// Column of the LNET counter line.
    LnetStats(LnetField),
}

/// Label names shared by every observation.
pub const BASE_LABELS: &[&str] = &["component", "target"];

/// One exported metric and where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTemplate {
    pub component: Component,
    /// Pattern below the source root, may contain glob wildcards.
    pub path: &'static str,
    /// File name, may contain `/` (e.g. `pool/granted`).
    pub filename: &'static str,
    /// Exported name without the namespace prefix.
    pub name: &'static str,
    pub help: &'static str,
    pub metric_type: MetricType,
    pub priority: Priority,
    pub format: Format,
}

impl MetricTemplate {
    /// Whether one file yields several series for this template.
    pub fn has_multiple_values(&self) -> bool {
        match self.format {
            Format::Stats(value) | Format::JobStats(value) => value == StatsValue::Operations,
            Format::Histogram { typed, .. } => typed,
            Format::Single | Format::Health | Format::LnetStats(_) => false,
        }
    }

    /// Number of directories embedded in the filename.
    ///
    /// The instance name sits this many levels above the file's own
    /// directory, so it must match the shape of `path`.
    pub fn directory_depth(&self) -> usize {
        self.filename.matches('/').count()
    }

    /// Fully qualified exported name.
    pub fn full_name(&self) -> String {
        format!("{}_{}", NAMESPACE, self.name)
    }

    /// Glob pattern for this template below `base`.
    pub fn pattern(&self, base: &Path) -> PathBuf {
        base.join(self.path).join(self.filename)
    }

    /// Declared label names, in emission order.
    pub fn label_names(&self) -> &'static [&'static str] {
        match self.format {
            Format::Single | Format::Health | Format::LnetStats(_) => BASE_LABELS,
            Format::Stats(StatsValue::Field(_)) => BASE_LABELS,
            Format::Stats(StatsValue::Operations) => &["component", "target", "operation"],
            Format::JobStats(StatsValue::Field(_)) => &["component", "target", "jobid"],
            Format::JobStats(StatsValue::Operations) => {
                &["component", "target", "jobid", "operation"]
            }
            Format::Histogram { typed: false, .. } => &["component", "target", "operation", "size"],
            Format::Histogram { typed: true, .. } => {
                &["component", "target", "operation", "size", "type"]
            }
        }
    }
}

/// Template-driven source families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `<proc>/fs/lustre`
    Procfs,
    /// `<proc>/sys/lnet`
    Procsys,
    /// `<sys>/fs/lustre`
    Sysfs,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Procfs, SourceKind::Procsys, SourceKind::Sysfs];

    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Procfs => "procfs",
            SourceKind::Procsys => "procsys",
            SourceKind::Sysfs => "sysfs",
        }
    }

    /// Root directory the templates of this source are resolved against.
    pub fn base_path(self, config: &Config) -> PathBuf {
        match self {
            SourceKind::Procfs => config.proc_path.join("fs/lustre"),
            SourceKind::Procsys => config.proc_path.join("sys/lnet"),
            SourceKind::Sysfs => config.sys_path.join("fs/lustre"),
        }
    }

    /// Components with templates in this source, in build order.
    pub fn components(self) -> &'static [Component] {
        match self {
            SourceKind::Procfs => &[
                Component::Ost,
                Component::Mdt,
                Component::Mgs,
                Component::Mds,
                Component::Client,
                Component::Generic,
            ],
            SourceKind::Procsys => &[Component::Lnet],
            SourceKind::Sysfs => &[Component::Health, Component::Ost],
        }
    }
}

/// Builds the templates of one component in one source at `level`.
pub fn build(component: Component, source: SourceKind, level: EnableLevel) -> Vec<MetricTemplate> {
    tables::groups(component, source)
        .iter()
        .flat_map(|group| {
            group
                .entries
                .iter()
                .filter(move |entry| entry.priority.included_at(level))
                .map(move |entry| entry.template(component, group.path))
        })
        .collect()
}

/// Builds every template of `source` for the configured levels.
///
/// Disabled components are skipped without invoking their builder.
pub fn templates(source: SourceKind, levels: &Levels) -> Vec<MetricTemplate> {
    let mut templates = Vec::new();
    for &component in source.components() {
        let level = component.level(levels);
        if !level.is_enabled() {
            continue;
        }
        templates.extend(build(component, source, level));
    }
    templates
}
