//! Grouping of decoded records into ordered size → time series.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::IndexMap;
use crate::decoder::{DecodedRecord, Label};

/// Ordered `(dimension, label)` pairs identifying one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DimensionKey(Vec<(String, Label)>);

impl DimensionKey {
    /// Creates an empty key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one dimension to the key.
    #[must_use]
    pub fn with(mut self, dimension: impl Into<String>, label: impl Into<Label>) -> Self {
        self.0.push((dimension.into(), label.into()));
        self
    }

    /// Returns the label of `dimension`, if part of the key.
    #[must_use]
    pub fn get(&self, dimension: &str) -> Option<&Label> {
        self.0
            .iter()
            .find(|(name, _)| name == dimension)
            .map(|(_, label)| label)
    }

    /// Iterates over the labels in key order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.0.iter().map(|(_, label)| label)
    }

    /// Number of dimensions in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key has no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = self.labels().filter(|label| !label.is_empty());
        if let Some(first) = labels.next() {
            write!(f, "{first}")?;
            for label in labels {
                write!(f, " / {label}")?;
            }
        }
        Ok(())
    }
}

/// One measurement of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Size parameter.
    pub size: u64,
    /// Time per iteration in nanoseconds.
    pub real_time: f64,
}

/// Points of one dimension key, strictly ascending by size.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    key: DimensionKey,
    points: Vec<Point>,
}

impl Series {
    /// The key identifying this series.
    #[must_use]
    pub fn key(&self) -> &DimensionKey {
        &self.key
    }

    /// Points in ascending size order, one per size.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Time at exactly `size`, if measured.
    #[must_use]
    pub fn value_at(&self, size: u64) -> Option<f64> {
        self.points
            .binary_search_by_key(&size, |point| point.size)
            .ok()
            .map(|index| self.points[index].real_time)
    }

    /// Largest measured size.
    #[must_use]
    pub fn max_size(&self) -> Option<u64> {
        self.points.last().map(|point| point.size)
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for series produced by [`build`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Series keyed by dimension key, in order of first appearance.
pub type SeriesMap = IndexMap<DimensionKey, Series>;

/// Groups `records` by `key_fn` into series.
///
/// Points are sorted by size; when several records share a key and a size,
/// the one appearing last in `records` wins. Keys are kept in order of first
/// appearance and no empty series is ever produced.
pub fn build<F>(records: &[DecodedRecord], key_fn: F) -> SeriesMap
where
    F: Fn(&DecodedRecord) -> DimensionKey,
{
    let mut groups: IndexMap<DimensionKey, BTreeMap<u64, f64>> = IndexMap::default();
    for record in records {
        groups
            .entry(key_fn(record))
            .or_default()
            .insert(record.size, record.real_time);
    }

    groups
        .into_iter()
        .map(|(key, points)| {
            let points = points
                .into_iter()
                .map(|(size, real_time)| Point { size, real_time })
                .collect();
            let series = Series {
                key: key.clone(),
                points,
            };
            (key, series)
        })
        .collect()
}

/// Key function projecting each record onto `dimensions`, in that order.
///
/// Dimensions a record does not have map to [`Label::Empty`].
pub fn key_by<S: AsRef<str>>(dimensions: &[S]) -> impl Fn(&DecodedRecord) -> DimensionKey + '_ {
    move |record| {
        dimensions.iter().fold(DimensionKey::new(), |key, dimension| {
            let dimension = dimension.as_ref();
            let label = record.dimension(dimension).cloned().unwrap_or(Label::Empty);
            key.with(dimension, label)
        })
    }
}
