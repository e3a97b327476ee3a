//! Static template tables, one group per path pattern.

use super::{
    Component, Format, LnetField, MetricTemplate, MetricType, Priority, Section, SourceKind,
    StatsField, StatsValue,
};

use MetricType::{Counter, Gauge};
use Priority::{Core, Extended};

/// A template minus the parts shared by its group.
#[derive(Debug, Clone, Copy)]
pub(super) struct Entry {
    pub filename: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub metric_type: MetricType,
    pub priority: Priority,
    pub format: Format,
}

impl Entry {
    pub(super) fn template(&self, component: Component, path: &'static str) -> MetricTemplate {
        MetricTemplate {
            component,
            path,
            filename: self.filename,
            name: self.name,
            help: self.help,
            metric_type: self.metric_type,
            priority: self.priority,
            format: self.format,
        }
    }
}

/// Entries sharing one path pattern.
#[derive(Debug)]
pub(super) struct Group {
    pub path: &'static str,
    pub entries: &'static [Entry],
}

pub(super) fn groups(component: Component, source: SourceKind) -> &'static [Group] {
    match (source, component) {
        (SourceKind::Procfs, Component::Ost) => PROCFS_OST,
        (SourceKind::Procfs, Component::Mdt) => PROCFS_MDT,
        (SourceKind::Procfs, Component::Mgs) => PROCFS_MGS,
        (SourceKind::Procfs, Component::Mds) => &[],
        (SourceKind::Procfs, Component::Client) => PROCFS_CLIENT,
        (SourceKind::Procfs, Component::Generic) => PROCFS_GENERIC,
        (SourceKind::Procsys, Component::Lnet) => PROCSYS_LNET,
        (SourceKind::Sysfs, Component::Health) => SYSFS_HEALTH,
        (SourceKind::Sysfs, Component::Ost) => SYSFS_OST,
        _ => &[],
    }
}

const fn entry(
    filename: &'static str,
    name: &'static str,
    help: &'static str,
    metric_type: MetricType,
    priority: Priority,
    format: Format,
) -> Entry {
    Entry {
        filename,
        name,
        help,
        metric_type,
        priority,
        format,
    }
}

const SINGLE: Format = Format::Single;
const OPERATIONS: Format = Format::Stats(StatsValue::Operations);
const JOB_OPERATIONS: Format = Format::JobStats(StatsValue::Operations);

const fn stats(field: StatsField) -> Format {
    Format::Stats(StatsValue::Field(field))
}

const fn job(field: StatsField) -> Format {
    Format::JobStats(StatsValue::Field(field))
}

const fn histogram(section: Section) -> Format {
    Format::Histogram {
        section,
        typed: false,
    }
}

const fn typed_histogram(section: Section) -> Format {
    Format::Histogram {
        section,
        typed: true,
    }
}

const fn lnet(field: LnetField) -> Format {
    Format::LnetStats(field)
}

// stats / job_stats
const READ_SAMPLES_HELP: &str = "Total number of reads that have been recorded.";
const READ_MAXIMUM_HELP: &str = "The maximum read size in bytes.";
const READ_MINIMUM_HELP: &str = "The minimum read size in bytes.";
const READ_TOTAL_HELP: &str = "The total number of bytes that have been read.";
const WRITE_SAMPLES_HELP: &str = "Total number of writes that have been recorded.";
const WRITE_MAXIMUM_HELP: &str = "The maximum write size in bytes.";
const WRITE_MINIMUM_HELP: &str = "The minimum write size in bytes.";
const WRITE_TOTAL_HELP: &str = "The total number of bytes that have been written.";
const OPERATIONS_HELP: &str = "Number of operations the filesystem has performed.";

// brw_stats
const PAGES_PER_BULK_RW_HELP: &str = "Total number of pages per block RPC.";
const DISCONTIGUOUS_PAGES_HELP: &str = "Total number of logical discontinuities per RPC.";
const IO_TIME_HELP: &str =
    "Total time in milliseconds the filesystem has spent processing various object sizes.";
const DISK_IO_SIZE_HELP: &str =
    "Total number of operations the filesystem has performed for the given size.";
const DISK_IOS_IN_FLIGHT_HELP: &str =
    "Current number of I/O operations that are processing during the snapshot.";

// rpc_stats
const PAGES_PER_RPC_HELP: &str = "Total number of pages per RPC.";
const RPCS_IN_FLIGHT_HELP: &str = "Current number of RPCs that are processing during the snapshot.";
const OFFSET_HELP: &str = "Current RPC offset by size.";

// backing filesystem
const BLOCKSIZE_HELP: &str = "Filesystem block size in bytes";
const INODES_FREE_HELP: &str = "The number of inodes (objects) available";
const INODES_MAXIMUM_HELP: &str = "The maximum number of inodes (objects) the filesystem can hold";
const KBYTES_AVAILABLE_HELP: &str = "Number of kilobytes readily available in the pool";
const KBYTES_FREE_HELP: &str = "Number of kilobytes free in the pool";
const KBYTES_TOTAL_HELP: &str = "Capacity of the pool in kilobytes";
const EXPORTS_HELP: &str = "Total number of times the pool has been exported";

const ENCRYPT_PAGE_POOLS: &str = "encrypt_page_pools";

static PROCFS_OST: &[Group] = &[
    Group {
        path: "obdfilter/*-OST*",
        entries: &[
            entry("brw_size", "brw_size_megabytes", "Block read/write size in megabytes", Gauge, Extended, SINGLE),
            entry(
                "grant_compat_disable",
                "grant_compat_disabled",
                "Binary indicator as to whether clients with OBD_CONNECT_GRANT_PARAM setting will be granted space",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "job_cleanup_interval",
                "job_cleanup_interval_seconds",
                "Interval in seconds between cleanup of tuning statistics",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("job_stats", "job_read_samples_total", READ_SAMPLES_HELP, Counter, Core, job(StatsField::ReadSamples)),
            entry("job_stats", "job_read_minimum_size_bytes", READ_MINIMUM_HELP, Gauge, Core, job(StatsField::ReadMinimum)),
            entry("job_stats", "job_read_maximum_size_bytes", READ_MAXIMUM_HELP, Gauge, Core, job(StatsField::ReadMaximum)),
            entry("job_stats", "job_read_bytes_total", READ_TOTAL_HELP, Counter, Core, job(StatsField::ReadTotal)),
            entry("job_stats", "job_write_samples_total", WRITE_SAMPLES_HELP, Counter, Core, job(StatsField::WriteSamples)),
            entry("job_stats", "job_write_minimum_size_bytes", WRITE_MINIMUM_HELP, Gauge, Extended, job(StatsField::WriteMinimum)),
            entry("job_stats", "job_write_maximum_size_bytes", WRITE_MAXIMUM_HELP, Gauge, Extended, job(StatsField::WriteMaximum)),
            entry("job_stats", "job_write_bytes_total", WRITE_TOTAL_HELP, Counter, Core, job(StatsField::WriteTotal)),
            entry("job_stats", "job_stats_total", OPERATIONS_HELP, Counter, Core, JOB_OPERATIONS),
            entry("num_exports", "exports_total", EXPORTS_HELP, Counter, Core, SINGLE),
            entry(
                "recovery_time_hard",
                "recovery_time_hard_seconds",
                "Maximum timeout 'recover_time_soft' can increment to for a single server",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "recovery_time_soft",
                "recovery_time_soft_seconds",
                "Duration in seconds for a client to attempt to reconnect after a crash (automatically incremented if servers are still in an error state)",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("stats", "read_samples_total", READ_SAMPLES_HELP, Counter, Core, stats(StatsField::ReadSamples)),
            entry("stats", "read_minimum_size_bytes", READ_MINIMUM_HELP, Gauge, Extended, stats(StatsField::ReadMinimum)),
            entry("stats", "read_maximum_size_bytes", READ_MAXIMUM_HELP, Gauge, Extended, stats(StatsField::ReadMaximum)),
            entry("stats", "read_bytes_total", READ_TOTAL_HELP, Counter, Core, stats(StatsField::ReadTotal)),
            entry("stats", "write_samples_total", WRITE_SAMPLES_HELP, Counter, Core, stats(StatsField::WriteSamples)),
            entry("stats", "write_minimum_size_bytes", WRITE_MINIMUM_HELP, Gauge, Extended, stats(StatsField::WriteMinimum)),
            entry("stats", "write_maximum_size_bytes", WRITE_MAXIMUM_HELP, Gauge, Extended, stats(StatsField::WriteMaximum)),
            entry("stats", "write_bytes_total", WRITE_TOTAL_HELP, Counter, Core, stats(StatsField::WriteTotal)),
            entry("stats", "stats_total", OPERATIONS_HELP, Counter, Core, OPERATIONS),
            entry(
                "tot_dirty",
                "exports_dirty_total",
                "Total number of exports that have been marked dirty",
                Counter,
                Core,
                SINGLE,
            ),
            entry(
                "tot_granted",
                "exports_granted_total",
                "Total number of exports that have been marked granted",
                Counter,
                Core,
                SINGLE,
            ),
            entry(
                "tot_pending",
                "exports_pending_total",
                "Total number of exports that have been marked pending",
                Counter,
                Core,
                SINGLE,
            ),
        ],
    },
    Group {
        path: "osd-*/*-OST*",
        entries: &[
            entry("blocksize", "blocksize_bytes", BLOCKSIZE_HELP, Gauge, Core, SINGLE),
            entry(
                "brw_stats",
                "pages_per_bulk_rw_total",
                PAGES_PER_BULK_RW_HELP,
                Counter,
                Extended,
                histogram(Section::PagesPerBulkRw),
            ),
            entry(
                "brw_stats",
                "discontiguous_pages_total",
                DISCONTIGUOUS_PAGES_HELP,
                Counter,
                Extended,
                histogram(Section::DiscontiguousPages),
            ),
            entry("brw_stats", "disk_io", DISK_IOS_IN_FLIGHT_HELP, Gauge, Core, histogram(Section::DiskIosInFlight)),
            entry("brw_stats", "io_time_milliseconds_total", IO_TIME_HELP, Counter, Core, histogram(Section::IoTime)),
            entry("brw_stats", "disk_io_total", DISK_IO_SIZE_HELP, Counter, Core, histogram(Section::DiskIoSize)),
            entry("filesfree", "inodes_free", INODES_FREE_HELP, Gauge, Core, SINGLE),
            entry("filestotal", "inodes_maximum", INODES_MAXIMUM_HELP, Gauge, Core, SINGLE),
            entry("kbytesfree", "free_kilobytes", KBYTES_FREE_HELP, Gauge, Core, SINGLE),
            entry("kbytesavail", "available_kilobytes", KBYTES_AVAILABLE_HELP, Gauge, Core, SINGLE),
            entry("kbytestotal", "capacity_kilobytes", KBYTES_TOTAL_HELP, Gauge, Core, SINGLE),
        ],
    },
];

static PROCFS_MDT: &[Group] = &[
    Group {
        path: "osd-*/*-MDT*",
        entries: &[
            entry("blocksize", "blocksize_bytes", BLOCKSIZE_HELP, Gauge, Core, SINGLE),
            entry("filesfree", "inodes_free", INODES_FREE_HELP, Gauge, Core, SINGLE),
            entry("filestotal", "inodes_maximum", INODES_MAXIMUM_HELP, Gauge, Core, SINGLE),
            entry("kbytesavail", "available_kilobytes", KBYTES_AVAILABLE_HELP, Gauge, Core, SINGLE),
            entry("kbytesfree", "free_kilobytes", KBYTES_FREE_HELP, Gauge, Core, SINGLE),
            entry("kbytestotal", "capacity_kilobytes", KBYTES_TOTAL_HELP, Gauge, Core, SINGLE),
        ],
    },
    Group {
        path: "mdt/*",
        entries: &[
            entry("md_stats", "stats_total", OPERATIONS_HELP, Counter, Core, OPERATIONS),
            entry("num_exports", "exports_total", EXPORTS_HELP, Counter, Core, SINGLE),
            entry("job_stats", "job_stats_total", OPERATIONS_HELP, Counter, Core, JOB_OPERATIONS),
        ],
    },
];

static PROCFS_MGS: &[Group] = &[Group {
    path: "mgs/MGS/osd/",
    entries: &[
        entry("blocksize", "blocksize_bytes", BLOCKSIZE_HELP, Gauge, Core, SINGLE),
        entry("filesfree", "inodes_free", INODES_FREE_HELP, Gauge, Core, SINGLE),
        entry("filestotal", "inodes_maximum", INODES_MAXIMUM_HELP, Gauge, Core, SINGLE),
        entry("kbytesavail", "available_kilobytes", KBYTES_AVAILABLE_HELP, Gauge, Core, SINGLE),
        entry("kbytesfree", "free_kilobytes", KBYTES_FREE_HELP, Gauge, Core, SINGLE),
        entry("kbytestotal", "capacity_kilobytes", KBYTES_TOTAL_HELP, Gauge, Core, SINGLE),
    ],
}];

static PROCFS_CLIENT: &[Group] = &[
    Group {
        path: "llite/*",
        entries: &[
            entry("blocksize", "blocksize_bytes", BLOCKSIZE_HELP, Gauge, Core, SINGLE),
            entry(
                "checksum_pages",
                "checksum_pages_enabled",
                "Returns '1' if data checksumming is enabled for the client",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "default_easize",
                "default_ea_size_bytes",
                "Default Extended Attribute (EA) size in bytes",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("filesfree", "inodes_free", INODES_FREE_HELP, Gauge, Core, SINGLE),
            entry("filestotal", "inodes_maximum", INODES_MAXIMUM_HELP, Gauge, Core, SINGLE),
            entry("kbytesavail", "available_kilobytes", KBYTES_AVAILABLE_HELP, Gauge, Core, SINGLE),
            entry("kbytesfree", "free_kilobytes", KBYTES_FREE_HELP, Gauge, Core, SINGLE),
            entry("kbytestotal", "capacity_kilobytes", KBYTES_TOTAL_HELP, Gauge, Core, SINGLE),
            entry(
                "lazystatfs",
                "lazystatfs_enabled",
                "Returns '1' if lazystatfs (a non-blocking alternative to statfs) is enabled for the client",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "max_easize",
                "maximum_ea_size_bytes",
                "Maximum Extended Attribute (EA) size in bytes",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "max_read_ahead_mb",
                "maximum_read_ahead_megabytes",
                "Maximum number of megabytes to read ahead",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "max_read_ahead_per_file_mb",
                "maximum_read_ahead_per_file_megabytes",
                "Maximum number of megabytes per file to read ahead",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "max_read_ahead_whole_mb",
                "maximum_read_ahead_whole_megabytes",
                "Maximum file size in megabytes for a file to be read in its entirety",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "statahead_agl",
                "statahead_agl_enabled",
                "Returns '1' if the Asynchronous Glimpse Lock (AGL) for statahead is enabled",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "statahead_max",
                "statahead_maximum",
                "Maximum window size for statahead",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("stats", "read_samples_total", READ_SAMPLES_HELP, Counter, Core, stats(StatsField::ReadSamples)),
            entry("stats", "read_minimum_size_bytes", READ_MINIMUM_HELP, Gauge, Extended, stats(StatsField::ReadMinimum)),
            entry("stats", "read_maximum_size_bytes", READ_MAXIMUM_HELP, Gauge, Extended, stats(StatsField::ReadMaximum)),
            entry("stats", "read_bytes_total", READ_TOTAL_HELP, Counter, Core, stats(StatsField::ReadTotal)),
            entry("stats", "write_samples_total", WRITE_SAMPLES_HELP, Counter, Core, stats(StatsField::WriteSamples)),
            entry("stats", "write_minimum_size_bytes", WRITE_MINIMUM_HELP, Gauge, Extended, stats(StatsField::WriteMinimum)),
            entry("stats", "write_maximum_size_bytes", WRITE_MAXIMUM_HELP, Gauge, Extended, stats(StatsField::WriteMaximum)),
            entry("stats", "write_bytes_total", WRITE_TOTAL_HELP, Counter, Core, stats(StatsField::WriteTotal)),
            entry("stats", "stats_total", OPERATIONS_HELP, Counter, Core, OPERATIONS),
            entry(
                "xattr_cache",
                "xattr_cache_enabled",
                "Returns '1' if extended attribute cache is enabled",
                Gauge,
                Extended,
                SINGLE,
            ),
        ],
    },
    Group {
        path: "mdc/*",
        entries: &[entry(
            "rpc_stats",
            "rpcs_in_flight",
            RPCS_IN_FLIGHT_HELP,
            Gauge,
            Core,
            typed_histogram(Section::RpcsInFlight),
        )],
    },
    Group {
        path: "osc/*",
        entries: &[
            entry("rpc_stats", "pages_per_rpc_total", PAGES_PER_RPC_HELP, Counter, Core, histogram(Section::PagesPerRpc)),
            entry(
                "rpc_stats",
                "rpcs_in_flight",
                RPCS_IN_FLIGHT_HELP,
                Gauge,
                Core,
                typed_histogram(Section::RpcsInFlight),
            ),
            entry("rpc_stats", "rpcs_offset", OFFSET_HELP, Gauge, Core, histogram(Section::Offset)),
        ],
    },
];

static PROCFS_GENERIC: &[Group] = &[Group {
    path: "sptlrpc",
    entries: &[
        entry(ENCRYPT_PAGE_POOLS, "physical_pages", "Capacity of physical memory.", Gauge, Extended, stats(StatsField::PhysicalPages)),
        entry(ENCRYPT_PAGE_POOLS, "pages_per_pool", "Number of pages per pool.", Gauge, Extended, stats(StatsField::PagesPerPool)),
        entry(
            ENCRYPT_PAGE_POOLS,
            "maximum_pages",
            "Maximum number of pages that can be held.",
            Gauge,
            Extended,
            stats(StatsField::MaxPages),
        ),
        entry(ENCRYPT_PAGE_POOLS, "maximum_pools", "Number of pools.", Gauge, Extended, stats(StatsField::MaxPools)),
        entry(ENCRYPT_PAGE_POOLS, "pages_in_pools", "Number of pages in all pools.", Gauge, Extended, stats(StatsField::TotalPages)),
        entry(ENCRYPT_PAGE_POOLS, "free_pages", "Current number of pages available.", Gauge, Extended, stats(StatsField::TotalFree)),
        entry(
            ENCRYPT_PAGE_POOLS,
            "maximum_pages_reached_total",
            "Total number of pages reached.",
            Counter,
            Extended,
            stats(StatsField::MaxPagesReached),
        ),
        entry(ENCRYPT_PAGE_POOLS, "grows_total", "Total number of grows.", Counter, Extended, stats(StatsField::Grows)),
        entry(
            ENCRYPT_PAGE_POOLS,
            "grows_failure_total",
            "Total number of failures while attempting to add pages.",
            Counter,
            Extended,
            stats(StatsField::GrowsFailure),
        ),
        entry(ENCRYPT_PAGE_POOLS, "shrinks_total", "Total number of shrinks.", Counter, Extended, stats(StatsField::Shrinks)),
        entry(
            ENCRYPT_PAGE_POOLS,
            "cache_access_total",
            "Total number of times cache has been accessed.",
            Counter,
            Extended,
            stats(StatsField::CacheAccess),
        ),
        entry(ENCRYPT_PAGE_POOLS, "cache_miss_total", "Total number of cache misses.", Counter, Extended, stats(StatsField::CacheMissing)),
        entry(
            ENCRYPT_PAGE_POOLS,
            "free_page_low",
            "Lowest number of free pages reached.",
            Gauge,
            Extended,
            stats(StatsField::LowFreeMark),
        ),
        entry(
            ENCRYPT_PAGE_POOLS,
            "maximum_waitqueue_depth",
            "Maximum waitqueue length.",
            Gauge,
            Extended,
            stats(StatsField::MaxWaitqueueDepth),
        ),
        entry(
            ENCRYPT_PAGE_POOLS,
            "out_of_memory_request_total",
            "Total number of out of memory requests.",
            Counter,
            Extended,
            stats(StatsField::OutOfMem),
        ),
    ],
}];

static PROCSYS_LNET: &[Group] = &[Group {
    path: "",
    entries: &[
        entry(
            "catastrophe",
            "catastrophe_enabled",
            "Returns 1 if currently in catastrophe mode",
            Gauge,
            Core,
            SINGLE,
        ),
        entry(
            "console_backoff",
            "console_backoff_enabled",
            "Returns non-zero number if console_backoff is enabled",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "console_max_delay_centisecs",
            "console_max_delay_centiseconds",
            "Maximum time in centiseconds before the console logs a message",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "console_min_delay_centisecs",
            "console_min_delay_centiseconds",
            "Minimum time in centiseconds before the console logs a message",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "console_ratelimit",
            "console_ratelimit_enabled",
            "Returns 1 if the console message rate limiting is enabled",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "debug_mb",
            "debug_megabytes",
            "Maximum buffer size in megabytes for the LNET debug messages",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "fail_err",
            "fail_error_total",
            "Number of errors that have been thrown",
            Counter,
            Core,
            SINGLE,
        ),
        entry(
            "fail_val",
            "fail_maximum",
            "Maximum number of times to fail",
            Gauge,
            Core,
            SINGLE,
        ),
        entry(
            "lnet_memused",
            "lnet_memory_used_bytes",
            "Number of bytes allocated by LNET",
            Gauge,
            Core,
            SINGLE,
        ),
        entry(
            "panic_on_lbug",
            "panic_on_lbug_enabled",
            "Returns 1 if panic_on_lbug is enabled",
            Gauge,
            Core,
            SINGLE,
        ),
        entry(
            "watchdog_ratelimit",
            "watchdog_ratelimit_enabled",
            "Returns 1 if the watchdog rate limiter is enabled",
            Gauge,
            Extended,
            SINGLE,
        ),
        entry(
            "stats",
            "allocated",
            "Number of messages currently allocated",
            Gauge,
            Core,
            lnet(LnetField::Allocated),
        ),
        entry(
            "stats",
            "maximum",
            "Maximum number of outstanding messages",
            Gauge,
            Core,
            lnet(LnetField::Maximum),
        ),
        entry("stats", "errors_total", "Total number of errors", Counter, Core, lnet(LnetField::Errors)),
        entry(
            "stats",
            "send_count_total",
            "Total number of messages that have been sent",
            Counter,
            Core,
            lnet(LnetField::SendCount),
        ),
        entry(
            "stats",
            "receive_count_total",
            "Total number of messages that have been received",
            Counter,
            Core,
            lnet(LnetField::ReceiveCount),
        ),
        entry(
            "stats",
            "route_count_total",
            "Total number of messages that have been routed",
            Counter,
            Core,
            lnet(LnetField::RouteCount),
        ),
        entry(
            "stats",
            "drop_count_total",
            "Total number of messages that have been dropped",
            Counter,
            Core,
            lnet(LnetField::DropCount),
        ),
        entry(
            "stats",
            "send_bytes_total",
            "Total number of bytes sent",
            Counter,
            Core,
            lnet(LnetField::SendBytes),
        ),
        entry(
            "stats",
            "receive_bytes_total",
            "Total number of bytes received",
            Counter,
            Core,
            lnet(LnetField::ReceiveBytes),
        ),
        entry(
            "stats",
            "route_bytes_total",
            "Total number of bytes for routed messages",
            Counter,
            Core,
            lnet(LnetField::RouteBytes),
        ),
        entry(
            "stats",
            "drop_bytes_total",
            "Total number of bytes that have been dropped",
            Counter,
            Core,
            lnet(LnetField::DropBytes),
        ),
    ],
}];

static SYSFS_HEALTH: &[Group] = &[Group {
    path: "",
    entries: &[entry(
        "health_check",
        "health_check",
        "Current health status for the indicated instance: 1 refers to 'healthy', 0 refers to 'unhealthy'",
        Gauge,
        Core,
        Format::Health,
    )],
}];

static SYSFS_OST: &[Group] = &[
    Group {
        path: "obdfilter/*-OST*",
        entries: &[
            entry(
                "degraded",
                "degraded",
                "Binary indicator as to whether or not the pool is degraded - 0 for not degraded, 1 for degraded",
                Gauge,
                Core,
                SINGLE,
            ),
            entry(
                "grant_precreate",
                "grant_precreate_capacity_bytes",
                "Maximum space in bytes that clients can preallocate for objects",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "lfsck_speed_limit",
                "lfsck_speed_limit",
                "Maximum operations per second LFSCK (Lustre filesystem verification) can run",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "precreate_batch",
                "precreate_batch",
                "Maximum number of objects that can be included in a single transaction",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "soft_sync_limit",
                "soft_sync_limit",
                "Number of RPCs necessary before triggering a sync",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry(
                "sync_journal",
                "sync_journal_enabled",
                "Binary indicator as to whether or not the journal is set for asynchronous commits",
                Gauge,
                Extended,
                SINGLE,
            ),
        ],
    },
    Group {
        path: "ldlm/namespaces/filter-*",
        entries: &[
            entry("lock_count", "lock_count", "Number of locks", Gauge, Extended, SINGLE),
            entry("lock_timeouts", "lock_timeout", "Number of lock timeouts", Counter, Extended, SINGLE),
            entry("contended_locks", "lock_contended", "Number of contended locks", Gauge, Extended, SINGLE),
            entry(
                "contention_seconds",
                "lock_contention_seconds",
                "Time in seconds during which locks were contended",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("pool/granted", "lock_granted", "Number of granted locks", Gauge, Extended, SINGLE),
            entry(
                "pool/grant_plan",
                "lock_grant_plan",
                "Number of planned lock grants per second",
                Gauge,
                Extended,
                SINGLE,
            ),
            entry("pool/grant_rate", "lock_grant_rate", "Lock grant rate", Gauge, Extended, SINGLE),
        ],
    },
];
