//! Derived metrics over grouped series: per-category comparisons at one size
//! and speedup ratios against a baseline method.
//!
//! Both operations read series keyed by exactly a category dimension and a
//! method dimension, e.g. `key_by(&["scenario", "method"])`. Every output row carries the
//! same method columns in the same order, so grouped bar charts stay aligned
//! even when a method was not measured somewhere.
//!
//! # Example
//!
//! ```
//! use bench_charts::{DimensionKey, Label, SizeSelector, speedup_at};
//! # use bench_charts::{BenchmarkRecord, NameDecoder, NameGrammar, build, key_by};
//! # let grammar = NameGrammar::new("histogram", "1").dimension("method", 2).dimension("scenario", 3);
//! # let decoder = NameDecoder::new(&grammar).unwrap();
//! # let decoded = decoder.decode_all(&[
//! #     BenchmarkRecord::new("BM_Histogram_Naive_Random/4096", 200.0),
//! #     BenchmarkRecord::new("BM_Histogram_SIMD_Random/4096", 50.0),
//! # ]);
//! # let series = build(&decoded.records, key_by(&["scenario", "method"]));
//! let speedups = speedup_at(&series, SizeSelector::default(), "scenario", "method", &Label::from("Naive"));
//! let row = &speedups.rows[0];
//! assert_eq!(row.ratios[&Label::from("Naive")], 1.0);
//! assert_eq!(row.ratios[&Label::from("SIMD")], 4.0);
//! ```

use alloc::vec::Vec;

use crate::IndexMap;
use crate::decoder::Label;
use crate::series::{Series, SeriesMap};

/// Value reported for a method that was not measured at the selected size.
///
/// Keeps chart layouts stable: the bar keeps its slot but has no height.
/// A sentinel can equal a real measurement of `0.0`, so rows also list the
/// methods that were not measured; use `is_missing` to tell them apart.
pub const MISSING: f64 = 0.0;

/// How the comparison size is chosen for each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SizeSelector {
    /// Largest size measured by any series of the category.
    #[default]
    MaxPerCategory,
    /// Largest size measured by any series at all.
    MaxOverall,
    /// A fixed size.
    Exact(u64),
}

/// Times of every method for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// The category label.
    pub category: Label,
    /// The size the values were taken at.
    pub size: u64,
    /// Time per method, [`MISSING`] where not measured.
    pub values: IndexMap<Label, f64>,
    /// Methods without a measurement at `size`, in column order.
    pub missing: Vec<Label>,
}

impl ComparisonRow {
    /// Returns `true` if `method` has no measurement at the row's size.
    #[must_use]
    pub fn is_missing(&self, method: &Label) -> bool {
        self.missing.contains(method)
    }
}

/// Speedup of every method over the baseline for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupRow {
    /// The category label.
    pub category: Label,
    /// The size the ratios were computed at.
    pub size: u64,
    /// `baseline_time / method_time` per method; exactly `1.0` for the
    /// baseline itself and [`MISSING`] where the method was not measured.
    pub ratios: IndexMap<Label, f64>,
    /// Methods whose ratio could not be computed (no positive time at
    /// `size`), in column order.
    pub missing: Vec<Label>,
}

impl SpeedupRow {
    /// Returns `true` if no ratio could be computed for `method`.
    #[must_use]
    pub fn is_missing(&self, method: &Label) -> bool {
        self.missing.contains(method)
    }
}

/// Rows of a metric computation plus the categories it had to leave out.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics<R> {
    /// One row per category, in order of first appearance.
    pub rows: Vec<R>,
    /// Categories without the baseline method at the selected size.
    pub missing_baseline: Vec<Label>,
    /// Categories with no measurement at all at the selected size.
    pub empty: Vec<Label>,
}

impl<R> Default for Metrics<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            missing_baseline: Vec::new(),
            empty: Vec::new(),
        }
    }
}

/// Series of one category, with the method labels in first-appearance order.
struct Grouped<'a> {
    categories: IndexMap<Label, Vec<&'a Series>>,
    methods: Vec<Label>,
}

fn group<'a>(series: &'a SeriesMap, category_dim: &str, method_dim: &str) -> Grouped<'a> {
    let mut categories: IndexMap<Label, Vec<&Series>> = IndexMap::default();
    let mut methods: Vec<Label> = Vec::new();
    for (key, series) in series {
        let category = key.get(category_dim).cloned().unwrap_or(Label::Empty);
        categories.entry(category).or_default().push(series);
        let method = key.get(method_dim).cloned().unwrap_or(Label::Empty);
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    Grouped {
        categories,
        methods,
    }
}

fn max_size<'a>(series: impl IntoIterator<Item = &'a Series>) -> Option<u64> {
    series.into_iter().filter_map(Series::max_size).max()
}

fn select_size(selector: SizeSelector, category: &[&Series], overall: Option<u64>) -> Option<u64> {
    match selector {
        SizeSelector::MaxPerCategory => max_size(category.iter().copied()),
        SizeSelector::MaxOverall => overall,
        SizeSelector::Exact(size) => Some(size),
    }
}

/// Time of `method` at `size` among the series of one category.
///
/// Series must be keyed by exactly the category and method dimensions: with
/// extra key dimensions several series match and only the first one is read.
fn time_of(category: &[&Series], method_dim: &str, method: &Label, size: u64) -> Option<f64> {
    category
        .iter()
        .filter(|series| series.key().get(method_dim).unwrap_or(&Label::Empty) == method)
        .find_map(|series| series.value_at(size))
}

/// Per-category comparison of every method at one size.
///
/// Methods without a point at the selected size get [`MISSING`]. Categories
/// where no method has a point there are reported in [`Metrics::empty`] and
/// produce no row.
#[must_use]
pub fn comparison_at(
    series: &SeriesMap,
    selector: SizeSelector,
    category_dim: &str,
    method_dim: &str,
) -> Metrics<ComparisonRow> {
    let grouped = group(series, category_dim, method_dim);
    let overall = max_size(series.values());
    let mut metrics = Metrics::default();

    for (category, members) in &grouped.categories {
        let Some(size) = select_size(selector, members, overall) else {
            metrics.empty.push(category.clone());
            continue;
        };
        let measured: Vec<(Label, Option<f64>)> = grouped
            .methods
            .iter()
            .map(|method| (method.clone(), time_of(members, method_dim, method, size)))
            .collect();

        if measured.iter().all(|(_, value)| value.is_none()) {
            metrics.empty.push(category.clone());
            continue;
        }
        let missing = measured
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(method, _)| method.clone())
            .collect();
        metrics.rows.push(ComparisonRow {
            category: category.clone(),
            size,
            values: measured
                .into_iter()
                .map(|(method, value)| (method, value.unwrap_or(MISSING)))
                .collect(),
            missing,
        });
    }
    metrics
}

/// Per-category speedup of every method over `baseline`.
///
/// `ratio(method) = time(baseline) / time(method)` at the selected size. A
/// category without a positive baseline time is skipped and reported in
/// [`Metrics::missing_baseline`]; a method without a positive time gets
/// [`MISSING`]. The baseline's own ratio is exactly `1.0`.
#[must_use]
pub fn speedup_at(
    series: &SeriesMap,
    selector: SizeSelector,
    category_dim: &str,
    method_dim: &str,
    baseline: &Label,
) -> Metrics<SpeedupRow> {
    let grouped = group(series, category_dim, method_dim);
    let overall = max_size(series.values());
    let mut metrics = Metrics::default();

    for (category, members) in &grouped.categories {
        let Some(size) = select_size(selector, members, overall) else {
            metrics.empty.push(category.clone());
            continue;
        };
        let Some(base) = time_of(members, method_dim, baseline, size).filter(|t| *t > 0.0) else {
            metrics.missing_baseline.push(category.clone());
            continue;
        };

        let mut ratios = IndexMap::default();
        let mut missing = Vec::new();
        for method in &grouped.methods {
            let ratio = if method == baseline {
                Some(1.0)
            } else {
                time_of(members, method_dim, method, size)
                    .filter(|t| *t > 0.0)
                    .map(|t| base / t)
            };
            if ratio.is_none() {
                missing.push(method.clone());
            }
            ratios.insert(method.clone(), ratio.unwrap_or(MISSING));
        }

        metrics.rows.push(SpeedupRow {
            category: category.clone(),
            size,
            ratios,
            missing,
        });
    }
    metrics
}
