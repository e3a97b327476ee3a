//! Single-value files: counters, the health sentinel and the LNET stats line.

use crate::catalog::LnetField;
use crate::error::ParseError;

/// Parses a file holding one number.
pub fn parse_single(content: &str) -> Result<f64, ParseError> {
    parse_number(content.trim())
}

/// `1.0` when the body reads exactly `healthy`, `0.0` otherwise.
pub fn parse_health(content: &str) -> f64 {
    if content.trim() == "healthy" { 1.0 } else { 0.0 }
}

/// Selects one column of `/proc/sys/lnet/stats`.
///
/// Columns: msgs_alloc msgs_max errors send_count recv_count route_count
/// drop_count send_length recv_length route_length drop_length.
pub fn lnet_stats_value(content: &str, field: LnetField) -> Result<f64, ParseError> {
    let column = content
        .split_whitespace()
        .nth(field.index())
        .ok_or_else(|| ParseError::missing("lnet stats column"))?;
    parse_number(column)
}

pub(crate) fn parse_number(text: &str) -> Result<f64, ParseError> {
    text.parse::<f64>().map_err(|_| ParseError::numeric(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::scenarios::LNET_STATS;

    #[test]
    fn test_parse_single() {
        assert_eq!(parse_single("30416\n"), Ok(30416.0));
        assert_eq!(parse_single("  1.5 "), Ok(1.5));
        assert_eq!(parse_single("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_single_garbage() {
        assert_eq!(
            parse_single("not-a-number\n"),
            Err(ParseError::numeric("not-a-number"))
        );
        assert!(parse_single("").is_err());
    }

    #[test]
    fn test_parse_health() {
        assert_eq!(parse_health("healthy\n"), 1.0);
        assert_eq!(parse_health("  healthy  "), 1.0);
        assert_eq!(parse_health("NOT HEALTHY\n"), 0.0);
        assert_eq!(parse_health("LBUG\n"), 0.0);
        assert_eq!(parse_health(""), 0.0);
    }

    #[test]
    fn test_lnet_stats_columns() {
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::Allocated), Ok(0.0));
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::Maximum), Ok(12.0));
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::SendCount), Ok(4815.0));
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::DropCount), Ok(3.0));
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::SendBytes), Ok(1048576.0));
        assert_eq!(lnet_stats_value(LNET_STATS, LnetField::DropBytes), Ok(96.0));
    }

    #[test]
    fn test_lnet_stats_short_line() {
        assert_eq!(
            lnet_stats_value("0 12 0", LnetField::RouteBytes),
            Err(ParseError::missing("lnet stats column"))
        );
    }
}
