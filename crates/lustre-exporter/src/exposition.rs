//! Rendering of scrape results: Prometheus text format and JSON.

use std::collections::BTreeMap;

use prometheus::proto::{self, LabelPair, Metric, MetricFamily};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;

use lustre_core::catalog::MetricType;
use lustre_core::collector::{Scraper, SourceReport};
use lustre_core::emitter::{Observation, VecSink};

pub const SCRAPE_DURATION: &str = "lustre_exporter_scrape_duration_seconds";

/// Groups observations into metric families sorted by name, followed by
/// per-source scrape duration.
///
/// Help and type of a family come from its first observation. Families
/// keep the observation order of their members.
pub fn families(observations: Vec<Observation>, reports: &[SourceReport]) -> Vec<MetricFamily> {
    let mut grouped: BTreeMap<String, MetricFamily> = BTreeMap::new();

    for observation in observations {
        let family = grouped.entry(observation.name.clone()).or_insert_with(|| {
            let mut family = MetricFamily::default();
            family.set_name(observation.name.clone());
            family.set_help(observation.help.to_string());
            family.set_field_type(proto_type(observation.metric_type));
            family
        });
        let sample = metric(&observation.labels, family.get_field_type(), observation.value);
        family.mut_metric().push(sample);
    }

    if !reports.is_empty() {
        let mut family = MetricFamily::default();
        family.set_name(SCRAPE_DURATION.to_string());
        family.set_help("Time spent updating each source family.".to_string());
        family.set_field_type(proto::MetricType::GAUGE);
        for report in reports {
            let labels = [
                ("source", report.name.to_string()),
                ("result", result_label(report).to_string()),
            ];
            family.mut_metric().push(metric(
                &labels,
                proto::MetricType::GAUGE,
                report.duration.as_secs_f64(),
            ));
        }
        grouped.insert(SCRAPE_DURATION.to_string(), family);
    }

    grouped.into_values().collect()
}

fn result_label(report: &SourceReport) -> &'static str {
    if report.succeeded() { "success" } else { "error" }
}

fn proto_type(metric_type: MetricType) -> proto::MetricType {
    match metric_type {
        MetricType::Counter => proto::MetricType::COUNTER,
        MetricType::Gauge => proto::MetricType::GAUGE,
        MetricType::Untyped => proto::MetricType::UNTYPED,
    }
}

fn metric(labels: &[(&'static str, String)], kind: proto::MetricType, value: f64) -> Metric {
    let mut metric = Metric::default();
    for (name, label_value) in labels {
        let mut pair = LabelPair::default();
        pair.set_name(name.to_string());
        pair.set_value(label_value.clone());
        metric.mut_label().push(pair);
    }
    match kind {
        proto::MetricType::COUNTER => {
            let mut counter = proto::Counter::default();
            counter.set_value(value);
            metric.set_counter(counter);
        }
        proto::MetricType::GAUGE => {
            let mut gauge = proto::Gauge::default();
            gauge.set_value(value);
            metric.set_gauge(gauge);
        }
        _ => {
            let mut untyped = proto::Untyped::default();
            untyped.set_value(value);
            metric.set_untyped(untyped);
        }
    }
    metric
}

/// Runs one scrape and renders it as Prometheus text.
pub fn render_text(scraper: &Scraper) -> Result<String, prometheus::Error> {
    let sink = VecSink::new();
    let reports = scraper.scrape(&sink);
    encode_text(&families(sink.into_observations(), &reports))
}

/// Runs one scrape and renders it as JSON.
pub fn render_json(scraper: &Scraper) -> Result<String, serde_json::Error> {
    let sink = VecSink::new();
    let reports = scraper.scrape(&sink);
    encode_json(&sink.into_observations(), &reports)
}

/// Encodes families in the Prometheus text exposition format.
pub fn encode_text(families: &[MetricFamily]) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

pub fn text_content_type() -> String {
    TextEncoder::new().format_type().to_string()
}

#[derive(Debug, Serialize)]
struct SourceSummary<'a> {
    name: &'a str,
    duration_seconds: f64,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScrapeDocument<'a> {
    timestamp: String,
    sources: Vec<SourceSummary<'a>>,
    observations: &'a [Observation],
}

/// One scrape as a JSON document.
pub fn encode_json(
    observations: &[Observation],
    reports: &[SourceReport],
) -> Result<String, serde_json::Error> {
    let sources = reports
        .iter()
        .map(|report| SourceSummary {
            name: report.name,
            duration_seconds: report.duration.as_secs_f64(),
            success: report.succeeded(),
            error: report.result.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    let document = ScrapeDocument {
        timestamp: chrono::Utc::now().to_rfc3339(),
        sources,
        observations,
    };
    serde_json::to_string_pretty(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use lustre_core::error::CollectError;

    fn observation(name: &str, target: &str, metric_type: MetricType, value: f64) -> Observation {
        Observation {
            name: name.to_string(),
            help: "Test help.",
            metric_type,
            labels: vec![("component", "ost".to_string()), ("target", target.to_string())],
            value,
        }
    }

    fn report(name: &'static str, result: Result<(), CollectError>) -> SourceReport {
        SourceReport {
            name,
            duration: Duration::from_millis(250),
            result,
        }
    }

    #[test]
    fn test_families_grouped_and_sorted() {
        let observations = vec![
            observation("lustre_free_kilobytes", "lustrefs-OST0000", MetricType::Gauge, 30416.0),
            observation("lustre_exports_total", "lustrefs-OST0000", MetricType::Counter, 3.0),
            observation("lustre_free_kilobytes", "lustrefs-OST0001", MetricType::Gauge, 12288.0),
        ];
        let families = families(observations, &[]);

        let names: Vec<&str> = families.iter().map(|f| f.get_name()).collect();
        assert_eq!(names, vec!["lustre_exports_total", "lustre_free_kilobytes"]);
        assert_eq!(families[0].get_field_type(), proto::MetricType::COUNTER);
        assert_eq!(families[1].get_metric().len(), 2);
        assert_eq!(families[1].get_metric()[1].get_gauge().get_value(), 12288.0);
    }

    #[test]
    fn test_text_output() {
        let observations = vec![observation(
            "lustre_exports_total",
            "lustrefs-OST0000",
            MetricType::Counter,
            3.0,
        )];
        let text = encode_text(&families(observations, &[])).unwrap();
        assert!(text.contains("# HELP lustre_exports_total Test help."));
        assert!(text.contains("# TYPE lustre_exports_total counter"));
        assert!(text.contains(r#"lustre_exports_total{component="ost",target="lustrefs-OST0000"} 3"#));
    }

    #[test]
    fn test_scrape_duration_family() {
        let reports = vec![
            report("procfs", Ok(())),
            report(
                "lctl",
                Err(CollectError::Command {
                    program: "lctl".into(),
                    reason: "not found".into(),
                }),
            ),
        ];
        let text = encode_text(&families(Vec::new(), &reports)).unwrap();
        assert!(text.contains("# TYPE lustre_exporter_scrape_duration_seconds gauge"));
        assert!(text.contains(r#"lustre_exporter_scrape_duration_seconds{source="procfs",result="success"} 0.25"#));
        assert!(text.contains(r#"lustre_exporter_scrape_duration_seconds{source="lctl",result="error"} 0.25"#));
    }

    #[test]
    fn test_empty_scrape_has_no_families() {
        assert!(families(Vec::new(), &[]).is_empty());
        assert_eq!(encode_text(&[]).unwrap(), "");
    }

    #[test]
    fn test_render_text_from_mock_tree() {
        use std::sync::Arc;

        use lustre_core::collector::MockFs;
        use lustre_core::config::{Config, EnableLevel, Levels};

        let config = Config {
            levels: Levels {
                health: EnableLevel::Core,
                ..Levels::none()
            },
            ..Config::default()
        };
        let scraper = Scraper::new(Arc::new(MockFs::ost_server()), &config).unwrap();
        let text = render_text(&scraper).unwrap();
        assert!(text.contains(r#"lustre_health_check{component="health",target="lustre"} 1"#));
        assert!(text.contains(r#"lustre_exporter_scrape_duration_seconds{source="sysfs",result="success"}"#));
    }

    #[test]
    fn test_json_output() {
        let observations = vec![observation(
            "lustre_health_check",
            "lustre",
            MetricType::Gauge,
            1.0,
        )];
        let reports = vec![report("sysfs", Ok(()))];
        let json = encode_json(&observations, &reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sources"][0]["name"], "sysfs");
        assert_eq!(value["sources"][0]["success"], true);
        assert!(value["sources"][0].get("error").is_none());
        assert_eq!(value["observations"][0]["name"], "lustre_health_check");
        assert_eq!(value["observations"][0]["metric_type"], "gauge");
        assert_eq!(value["observations"][0]["value"], 1.0);
        assert!(value["timestamp"].as_str().is_some());
    }
}
