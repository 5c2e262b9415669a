use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Loader payload: index-aligned labels plus named numeric attributes.
///
/// `IndexMap` keeps attribute declaration order so host UIs can list them
/// deterministically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub attributes: IndexMap<String, Vec<f64>>,
}

impl SeriesData {
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            attributes: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.attributes.insert(name.into(), values);
        self
    }

    /// Integer-labelled ramp `0..len` used before any real data is loaded.
    #[must_use]
    pub fn placeholder(len: usize, attribute: &str) -> Self {
        let labels = (0..len).map(|i| i.to_string()).collect();
        let values = (0..len).map(|i| i as f64).collect();
        Self::new(labels).with_attribute(attribute, values)
    }

    /// Builds one label per day starting at `start`, formatted as ISO dates.
    pub fn from_daily(
        start: NaiveDate,
        attributes: impl IntoIterator<Item = (String, Vec<f64>)>,
    ) -> ChartResult<Self> {
        let attributes: IndexMap<String, Vec<f64>> = attributes.into_iter().collect();
        let len = attributes.values().map(Vec::len).max().unwrap_or(0);
        let labels = (0..len)
            .map(|offset| {
                start
                    .checked_add_days(Days::new(offset as u64))
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .ok_or_else(|| {
                        ChartError::InvalidData("daily labels overflow the calendar".to_owned())
                    })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let data = Self { labels, attributes };
        data.validate()?;
        Ok(data)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.labels.is_empty() {
            return Err(ChartError::InvalidData(
                "series must contain at least one label".to_owned(),
            ));
        }
        for (name, values) in &self.attributes {
            if values.len() != self.labels.len() {
                return Err(ChartError::InvalidData(format!(
                    "attribute `{name}` has {} values but series has {} labels",
                    values.len(),
                    self.labels.len()
                )));
            }
        }
        Ok(())
    }

    /// Extracts one attribute as an encoded series.
    ///
    /// Returns `None` when the attribute is absent.
    #[must_use]
    pub fn encode(&self, attribute: &str) -> Option<Series> {
        let values = self.attributes.get(attribute)?;
        Some(Series {
            attribute: attribute.to_owned(),
            labels: self.labels.clone(),
            values: values.clone(),
        })
    }
}

/// One encoded attribute: values and labels, index-aligned and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    attribute: String,
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Min/max over finite values; `None` when no finite value exists.
    #[must_use]
    pub fn finite_extent(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |extent, value| match extent {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}
