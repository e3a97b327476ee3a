//! Pre-built mock Lustre trees for testing.
//!
//! File contents follow what Lustre 2.x prints; the numbers are made up but
//! internally consistent so tests can assert exact values.

use std::path::Path;

use super::filesystem::MockFs;

/// `obdfilter/<ost>/job_stats` with three jobs.
pub const OST_JOB_STATS: &str = "\
job_stats:
- job_id:          334
  snapshot_time:   1477432524
  read_bytes:      { samples:           0, unit: bytes, min:       0, max:       0, sum:               0 }
  write_bytes:     { samples:         126, unit: bytes, min: 1048576, max: 1048576, sum:       132120576 }
  getattr:         { samples:           0, unit:  reqs }
  setattr:         { samples:           0, unit:  reqs }
  punch:           { samples:          20, unit:  reqs }
  sync:            { samples:           0, unit:  reqs }
  destroy:         { samples:           0, unit:  reqs }
  create:          { samples:           0, unit:  reqs }
  statfs:          { samples:           0, unit:  reqs }
  get_info:        { samples:           0, unit:  reqs }
  set_info:        { samples:           0, unit:  reqs }
  quotactl:        { samples:           0, unit:  reqs }
- job_id:          dd.0
  snapshot_time:   1477432530
  read_bytes:      { samples:           4, unit: bytes, min:    4096, max: 1048576, sum:         2101248 }
  write_bytes:     { samples:           0, unit: bytes, min:       0, max:       0, sum:               0 }
  getattr:         { samples:           3, unit:  reqs }
  setattr:         { samples:           1, unit:  reqs }
  punch:           { samples:           0, unit:  reqs }
  sync:            { samples:           0, unit:  reqs }
  destroy:         { samples:           0, unit:  reqs }
  create:          { samples:           0, unit:  reqs }
  statfs:          { samples:           2, unit:  reqs }
  get_info:        { samples:           0, unit:  reqs }
  set_info:        { samples:           0, unit:  reqs }
  quotactl:        { samples:           0, unit:  reqs }
- job_id:          mdtest.1000
  snapshot_time:   1477432541
  read_bytes:      { samples:           0, unit: bytes, min:       0, max:       0, sum:               0 }
  write_bytes:     { samples:           2, unit: bytes, min:    4096, max:    8192, sum:           12288 }
  getattr:         { samples:           0, unit:  reqs }
  setattr:         { samples:           0, unit:  reqs }
  punch:           { samples:           0, unit:  reqs }
  sync:            { samples:           0, unit:  reqs }
  destroy:         { samples:           5, unit:  reqs }
  create:          { samples:           5, unit:  reqs }
  statfs:          { samples:           0, unit:  reqs }
  get_info:        { samples:           0, unit:  reqs }
  set_info:        { samples:           0, unit:  reqs }
  quotactl:        { samples:           0, unit:  reqs }
";

/// `obdfilter/<ost>/stats`.
pub const OST_STATS: &str = "\
snapshot_time             1477432524.123456 secs.usecs
read_bytes                1 samples [bytes] 1048576 1048576 1048576
write_bytes               9 samples [bytes] 4096 1048576 8392704
create                    3 samples [reqs]
get_info                  1 samples [reqs]
set_info_async            2 samples [reqs]
connect                   2 samples [reqs]
statfs                    314187 samples [reqs]
ping                      14630 samples [reqs]
";

/// `osd-*/<ost>/brw_stats`.
pub const OST_BRW_STATS: &str = "\
snapshot_time:         1477432524.123456 (secs.usecs)

                           read      |     write
pages per bulk r/w     rpcs  % cum % |  rpcs        % cum %
1:\t\t         1  50  50   |    0   0   0
256:\t\t         1  50 100   |  126 100 100

                           read      |     write
discontiguous pages    rpcs  % cum % |  rpcs        % cum %
0:\t\t         2 100 100   |  126 100 100

                           read      |     write
disk I/Os in flight    ios   % cum % |  ios         % cum %
1:\t\t         2 100 100   |  120  95  95
2:\t\t         0   0 100   |    6   5 100

                           read      |     write
I/O time (1/1000s)     ios   % cum % |  ios         % cum %
1:\t\t         2 100 100   |  100  79  79
2:\t\t         0   0 100   |   26  21 100

                           read      |     write
disk I/O size          ios   % cum % |  ios         % cum %
4K:\t\t         1  50  50   |    0   0   0
1M:\t\t         1  50 100   |  126 100 100
";

/// `mdt/<mdt>/md_stats`.
pub const MDT_MD_STATS: &str = "\
snapshot_time             1477432524.123456 secs.usecs
open                      1420 samples [reqs]
close                     1419 samples [reqs]
mknod                     2 samples [reqs]
unlink                    87 samples [reqs]
mkdir                     12 samples [reqs]
rename                    4 samples [reqs]
getattr                   2930 samples [reqs]
setattr                   14 samples [reqs]
statfs                    61 samples [reqs]
";

/// `mdt/<mdt>/job_stats` with a single job.
pub const MDT_JOB_STATS: &str = "\
job_stats:
- job_id:          cp.0
  snapshot_time:   1477432524
  open:            { samples:          10, unit:  reqs }
  close:           { samples:          10, unit:  reqs }
  mknod:           { samples:           0, unit:  reqs }
  link:            { samples:           0, unit:  reqs }
  unlink:          { samples:           0, unit:  reqs }
  mkdir:           { samples:           1, unit:  reqs }
  rmdir:           { samples:           0, unit:  reqs }
  rename:          { samples:           0, unit:  reqs }
  getattr:         { samples:          12, unit:  reqs }
  setattr:         { samples:           0, unit:  reqs }
  getxattr:        { samples:           0, unit:  reqs }
  setxattr:        { samples:           0, unit:  reqs }
  statfs:          { samples:           0, unit:  reqs }
  sync:            { samples:           0, unit:  reqs }
  samedir_rename:  { samples:           0, unit:  reqs }
  crossdir_rename: { samples:           0, unit:  reqs }
";

/// `osc/<instance>/rpc_stats`.
pub const OSC_RPC_STATS: &str = "\
snapshot_time:         1477432524.123456 (secs.usecs)
read RPCs in flight:  0
write RPCs in flight: 0
pending write pages:  0
pending read pages:   0

\t\t\tread\t\t\twrite
pages per rpc         rpcs   % cum % |       rpcs   % cum %
1:\t\t         3  60  60   |          0   0   0
256:\t\t         2  40 100   |          8 100 100

\t\t\tread\t\t\twrite
rpcs in flight        rpcs   % cum % |       rpcs   % cum %
1:\t\t         5 100 100   |          8 100 100

\t\t\tread\t\t\twrite
offset                rpcs   % cum % |       rpcs   % cum %
0:\t\t         5 100 100   |          8 100 100
";

/// `mdc/<instance>/rpc_stats`.
pub const MDC_RPC_STATS: &str = "\
snapshot_time:         1477432524.123456 (secs.usecs)
modify_RPCs_in_flight:  0

\t\t\tmodify
rpcs in flight        rpcs   % cum %
0:\t\t         0   0   0
1:\t\t        42 100 100
";

/// `sptlrpc/encrypt_page_pools`.
pub const ENCRYPT_PAGE_POOLS: &str = "\
physical pages:          4109426
pages per pool:          512
max pages:               513678
max pools:               1004
total pages:             0
total free:              0
max pages reached:       0
grows:                   0
grows failure:           0
shrinks:                 0
cache access:            0
cache missing:           0
low free mark:           0
max waitqueue depth:     0
out of mem:              0
";

/// `/proc/sys/lnet/stats`.
pub const LNET_STATS: &str = "0 12 0 4815 4811 0 3 1048576 524288 0 96\n";

/// `lctl get_param mdd.*-*.changelog_users` for one MDT.
pub const CHANGELOG_USERS: &str = "\
mdd.lustrefs-MDT0000.changelog_users=
current index: 34
ID    index (idle seconds)
cl1   32 (1234)
cl2   34 (5)
";

#[allow(dead_code)]
impl MockFs {
    /// An OSS with two OSTs on ldiskfs, plus health.
    pub fn ost_server() -> Self {
        let mut fs = Self::new();
        let proc = Path::new("/proc");

        fs.add_ost(
            proc,
            "lustrefs-OST0000",
            "osd-ldiskfs",
            &[
                ("job_stats", OST_JOB_STATS),
                ("stats", OST_STATS),
                ("num_exports", "3\n"),
                ("brw_stats", OST_BRW_STATS),
                ("kbytesfree", "30416\n"),
            ],
        );
        fs.add_ost(
            proc,
            "lustrefs-OST0001",
            "osd-ldiskfs",
            &[("num_exports", "2\n"), ("kbytesfree", "12288\n")],
        );

        fs.add_file("/sys/fs/lustre/health_check", "healthy\n");
        fs.add_file("/sys/fs/lustre/obdfilter/lustrefs-OST0000/degraded", "0\n");
        fs.add_file(
            "/sys/fs/lustre/ldlm/namespaces/filter-lustrefs-OST0000_UUID/pool/granted",
            "20\n",
        );
        fs
    }

    /// An MDS with one MDT.
    pub fn mdt_server() -> Self {
        let mut fs = Self::new();
        let mdt = Path::new("/proc/fs/lustre/mdt/lustrefs-MDT0000");
        fs.add_file(mdt.join("md_stats"), MDT_MD_STATS);
        fs.add_file(mdt.join("job_stats"), MDT_JOB_STATS);
        fs.add_file(mdt.join("num_exports"), "7\n");
        fs.add_file(
            "/proc/fs/lustre/osd-ldiskfs/lustrefs-MDT0000/filesfree",
            "2621384\n",
        );
        fs.add_file("/sys/fs/lustre/health_check", "healthy\n");
        fs
    }

    /// A client mounting one filesystem.
    pub fn client_node() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/fs/lustre/osc/lustrefs-OST0000-osc-ffff88105db50000/rpc_stats",
            OSC_RPC_STATS,
        );
        fs.add_file(
            "/proc/fs/lustre/mdc/lustrefs-MDT0000-mdc-ffff88105db50000/rpc_stats",
            MDC_RPC_STATS,
        );
        fs.add_file(
            "/proc/fs/lustre/llite/lustrefs-ffff88105db50000/blocksize",
            "4096\n",
        );
        fs.add_file("/proc/fs/lustre/sptlrpc/encrypt_page_pools", ENCRYPT_PAGE_POOLS);
        fs.add_file("/proc/sys/lnet/stats", LNET_STATS);
        fs.add_file("/proc/sys/lnet/lnet_memused", "2894240\n");
        fs.add_file("/proc/sys/lnet/catastrophe", "0\n");
        fs.add_file("/sys/fs/lustre/health_check", "NOT HEALTHY\n");
        fs
    }

    /// A node where an OST's counter file holds garbage.
    pub fn corrupt_ost() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/fs/lustre/obdfilter/lustrefs-OST0000/num_exports",
            "not-a-number\n",
        );
        fs.add_file("/sys/fs/lustre/health_check", "healthy\n");
        fs
    }
}
