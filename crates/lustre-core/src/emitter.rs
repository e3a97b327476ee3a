//! Observations and the sink they are delivered to.
//!
//! Label order is fixed per template: `component`, `target`, then the
//! format-specific labels returned by [`MetricTemplate::label_names`].

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::error;

use crate::catalog::{MetricTemplate, MetricType};

/// One parsed value with its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Fully qualified name, e.g. `lustre_job_read_bytes_total`.
    pub name: String,
    pub help: &'static str,
    pub metric_type: MetricType,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl Observation {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(label, _)| *label == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Receiver of observations. Shared by all source workers of a scrape.
pub trait Sink: Send + Sync {
    fn observe(&self, observation: Observation);
}

/// Sink collecting observations into a vector.
#[derive(Debug, Default)]
pub struct VecSink {
    observations: Mutex<Vec<Observation>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consumes the sink, returning observations in arrival order.
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Observation>> {
        self.observations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for VecSink {
    fn observe(&self, observation: Observation) {
        self.lock().push(observation);
    }
}

/// Emits observations of one template for one resolved target.
pub struct Emitter<'a> {
    sink: &'a dyn Sink,
    template: &'a MetricTemplate,
    target: &'a str,
}

impl<'a> Emitter<'a> {
    pub fn new(sink: &'a dyn Sink, template: &'a MetricTemplate, target: &'a str) -> Self {
        Self {
            sink,
            template,
            target,
        }
    }

    /// Emits a value with the format-specific label values, in declared order.
    ///
    /// A value list that does not match the template's label names is a
    /// catalog defect; it is logged and the observation dropped.
    pub fn emit(&self, extra: &[&str], value: f64) {
        let names = self.template.label_names();
        if names.len() != extra.len() + 2 {
            debug_assert!(false, "label mismatch for {}", self.template.name);
            error!(
                metric = self.template.name,
                expected = names.len(),
                got = extra.len() + 2,
                "label value count does not match label names"
            );
            return;
        }

        let values = [self.template.component.as_str(), self.target]
            .into_iter()
            .chain(extra.iter().copied());
        let labels = names
            .iter()
            .copied()
            .zip(values.map(str::to_string))
            .collect();

        self.sink.observe(Observation {
            name: self.template.full_name(),
            help: self.template.help,
            metric_type: self.template.metric_type,
            labels,
            value,
        });
    }
}
