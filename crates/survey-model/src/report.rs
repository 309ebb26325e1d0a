//! Metric report types.
//!
//! Every analysis stage returns its own immutable [`ReportSection`]; the
//! orchestrator merges them with a [`ReportBuilder`]. Entries keep insertion
//! order so cohort curves stay sorted the way they were computed, and the JSON
//! output mirrors that order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One report value.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// A numeric metric; `None` means the metric is unavailable (serialized as null).
    Value(Option<f64>),
    /// A count of respondents or tokens.
    Count(u64),
    /// A label, such as the top correlated factor.
    Text(String),
    /// Placeholder when the columns a metric needs are absent.
    NotApplicable(String),
    /// A nested, ordered mapping.
    Map(MetricMap),
}

impl Metric {
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Self::NotApplicable(reason.into())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(value) => *value,
            Self::Count(count) => Some(*count as f64),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(*count),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MetricMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable(_))
    }
}

impl From<MetricMap> for Metric {
    fn from(map: MetricMap) -> Self {
        Self::Map(map)
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(Some(value)) => serializer.serialize_f64(*value),
            Self::Value(None) => serializer.serialize_none(),
            Self::Count(count) => serializer.serialize_u64(*count),
            Self::Text(text) | Self::NotApplicable(text) => serializer.serialize_str(text),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

/// Ordered key/metric pairs. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricMap {
    entries: Vec<(String, Metric)>,
}

impl MetricMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, metric: Metric) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == key) {
            slot.1 = metric;
        } else {
            self.entries.push((key, metric));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Metric> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, metric)| metric)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Metric)> {
        self.entries
            .iter()
            .map(|(name, metric)| (name.as_str(), metric))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Metric)> for MetricMap {
    fn from_iter<T: IntoIterator<Item = (K, Metric)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, metric) in iter {
            map.insert(key, metric);
        }
        map
    }
}

impl Serialize for MetricMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, metric) in &self.entries {
            map.serialize_entry(key, metric)?;
        }
        map.end()
    }
}

/// The metric subset produced by one analysis stage.
pub type ReportSection = MetricMap;

/// Merges stage sections into a [`Report`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    entries: MetricMap,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn merge(mut self, section: ReportSection) -> Self {
        for (key, metric) in section.entries {
            self.entries.insert(key, metric);
        }
        self
    }

    pub fn build(self) -> Report {
        Report {
            entries: self.entries,
        }
    }
}

/// Read-only analysis output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: MetricMap,
}

impl Report {
    pub fn get(&self, key: &str) -> Option<&Metric> {
        self.entries.get(key)
    }

    /// Numeric value of a scalar entry.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Metric::as_f64)
    }

    pub fn map(&self, key: &str) -> Option<&MetricMap> {
        self.get(key).and_then(Metric::as_map)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Metric)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
