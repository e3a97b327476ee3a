//! Bucketed histograms from `brw_stats` and `rpc_stats`.
//!
//! ```text
//!                            read      |     write
//! pages per bulk r/w     rpcs  % cum % |  rpcs        % cum %
//! 1:                        1  50  50   |    0   0   0
//! 256:                      1  50 100   |  126 100 100
//! ```
//!
//! Each section runs from its title line to the next blank line. Dual-sided
//! rows carry read and write counts, single-sided rows (the `mdc` modify
//! histogram) only one.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Section;
use crate::error::ParseError;

use super::units::convert_to_bytes;
use super::values::parse_number;

static SECTION_PATTERNS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    Section::ALL
        .iter()
        .map(|&section| {
            let pattern = format!(r"(?ms)^{}.*?(?:\n\n|\z)", regex::escape(section.title()));
            (section, Regex::new(&pattern).expect("section regex"))
        })
        .collect()
});

/// One histogram row.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Size label, without its trailing colon; byte sizes are normalized.
    pub size: String,
    pub read: f64,
    /// `None` for single-sided rows.
    pub write: Option<f64>,
}

impl Bucket {
    fn empty(size: String) -> Self {
        Self {
            size,
            read: 0.0,
            write: Some(0.0),
        }
    }
}

/// Returns the raw text of `section`, header line included.
fn capture_section(content: &str, section: Section) -> Option<&str> {
    SECTION_PATTERNS
        .iter()
        .find(|(s, _)| *s == section)
        .and_then(|(_, regex)| regex.find(content))
        .map(|m| m.as_str())
}

/// Parses the rows of `section`.
///
/// A missing section yields no buckets. When the section declares a size
/// domain and its rows are dual-sided, every domain label is present in
/// the result (zero-filled), in domain order, followed by rows outside the
/// domain in file order.
pub fn histogram_buckets(content: &str, section: Section) -> Result<Vec<Bucket>, ParseError> {
    let Some(block) = capture_section(content, section) else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for line in block.lines().skip(1) {
        if line.len() <= 1 {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        let raw = fields[0].replace(':', "");
        let size = if section.byte_sized() {
            convert_to_bytes(&raw)
        } else {
            raw
        };
        let read = parse_number(fields[1])?;
        let write = if fields.len() >= 6 {
            Some(parse_number(fields[5])?)
        } else {
            None
        };
        rows.push(Bucket { size, read, write });
    }

    let dual_sided = rows.iter().any(|row| row.write.is_some());
    if section.domain().is_empty() || !dual_sided {
        return Ok(rows);
    }
    Ok(pad_to_domain(rows, section))
}

fn pad_to_domain(rows: Vec<Bucket>, section: Section) -> Vec<Bucket> {
    let domain: Vec<String> = section
        .domain()
        .iter()
        .map(|label| {
            if section.byte_sized() {
                convert_to_bytes(label)
            } else {
                label.to_string()
            }
        })
        .collect();

    let mut padded: Vec<Bucket> = domain
        .iter()
        .map(|label| {
            rows.iter()
                .find(|row| &row.size == label)
                .cloned()
                .unwrap_or_else(|| Bucket::empty(label.clone()))
        })
        .collect();
    padded.extend(rows.into_iter().filter(|row| !domain.contains(&row.size)));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::scenarios::{MDC_RPC_STATS, OSC_RPC_STATS, OST_BRW_STATS};

    fn sizes(buckets: &[Bucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.size.as_str()).collect()
    }

    #[test]
    fn test_pages_per_bulk_padded_to_domain() {
        let buckets = histogram_buckets(OST_BRW_STATS, Section::PagesPerBulkRw).unwrap();
        assert_eq!(
            sizes(&buckets),
            vec!["1", "2", "4", "8", "16", "32", "64", "128", "256"]
        );
        assert_eq!(
            buckets[0],
            Bucket {
                size: "1".into(),
                read: 1.0,
                write: Some(0.0)
            }
        );
        assert_eq!(buckets[4], Bucket::empty("16".into()));
        assert_eq!(buckets[8].read, 1.0);
        assert_eq!(buckets[8].write, Some(126.0));
    }

    #[test]
    fn test_disk_io_size_converted_and_padded() {
        let buckets = histogram_buckets(OST_BRW_STATS, Section::DiskIoSize).unwrap();
        assert_eq!(
            sizes(&buckets),
            vec![
                "4096", "8192", "16384", "32768", "65536", "131072", "262144", "524288", "1048576"
            ]
        );
        assert_eq!(buckets[0].read, 1.0);
        assert_eq!(buckets[8].write, Some(126.0));
    }

    #[test]
    fn test_linear_sections_keep_file_rows() {
        let in_flight = histogram_buckets(OST_BRW_STATS, Section::DiskIosInFlight).unwrap();
        assert_eq!(sizes(&in_flight), vec!["1", "2"]);
        assert_eq!(in_flight[1].write, Some(6.0));

        let io_time = histogram_buckets(OST_BRW_STATS, Section::IoTime).unwrap();
        assert_eq!(io_time.len(), 2);
        assert_eq!(io_time[0].write, Some(100.0));

        let discontiguous = histogram_buckets(OST_BRW_STATS, Section::DiscontiguousPages).unwrap();
        assert_eq!(
            discontiguous,
            vec![Bucket {
                size: "0".into(),
                read: 2.0,
                write: Some(126.0)
            }]
        );
    }

    #[test]
    fn test_rpc_stats_sections() {
        let pages = histogram_buckets(OSC_RPC_STATS, Section::PagesPerRpc).unwrap();
        assert_eq!(pages.len(), 9);
        assert_eq!(pages[0].read, 3.0);
        assert_eq!(pages[8].read, 2.0);
        assert_eq!(pages[8].write, Some(8.0));

        let in_flight = histogram_buckets(OSC_RPC_STATS, Section::RpcsInFlight).unwrap();
        assert_eq!(in_flight.len(), 1);

        let offset = histogram_buckets(OSC_RPC_STATS, Section::Offset).unwrap();
        assert_eq!(sizes(&offset), vec!["0"]);
    }

    #[test]
    fn test_single_sided_rows() {
        let buckets = histogram_buckets(MDC_RPC_STATS, Section::RpcsInFlight).unwrap();
        assert_eq!(
            buckets,
            vec![
                Bucket {
                    size: "0".into(),
                    read: 0.0,
                    write: None
                },
                Bucket {
                    size: "1".into(),
                    read: 42.0,
                    write: None
                },
            ]
        );
    }

    #[test]
    fn test_missing_section() {
        assert!(histogram_buckets(MDC_RPC_STATS, Section::PagesPerRpc).unwrap().is_empty());
        assert!(histogram_buckets("", Section::DiskIoSize).unwrap().is_empty());
    }

    #[test]
    fn test_rows_outside_domain_follow_domain() {
        let content = "pages per bulk r/w     rpcs  % cum % |  rpcs        % cum %\n\
                       512:  1  50  50   |    2   0   0\n\
                       2:    1  50 100   |    0   0   0\n";
        let buckets = histogram_buckets(content, Section::PagesPerBulkRw).unwrap();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[1].size, "2");
        assert_eq!(buckets[1].read, 1.0);
        assert_eq!(buckets[9].size, "512");
        assert_eq!(buckets[9].write, Some(2.0));
    }

    #[test]
    fn test_garbage_count() {
        let content = "offset                rpcs   % cum % |       rpcs   % cum %\n\
                       0:   many 100 100   |   8 100 100\n";
        assert_eq!(
            histogram_buckets(content, Section::Offset),
            Err(ParseError::numeric("many"))
        );
    }
}
