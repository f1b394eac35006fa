#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod chart;
pub mod decoder;
pub mod errors;
pub mod grammar;
pub mod metrics;
pub mod plan;
pub mod record;
pub mod series;

/// `IndexMap` alias using hashbrown's default hasher for `no_std` compatibility.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, hashbrown::DefaultHashBuilder>;

// Re-export main types
pub use chart::{
    AxisScale, Bar, BarGroup, ChartBody, ChartKind, ChartRenderer, ChartSpec, LinePlot,
    OutputNames, TickRule, ValueFormat, output_name,
};
pub use decoder::{Decoded, DecodedRecord, Label, NameDecoder, SkippedRecord};
pub use grammar::{DimensionSpec, Field, LabelTable, NameGrammar};
pub use metrics::{
    ComparisonRow, MISSING, Metrics, SizeSelector, SpeedupRow, comparison_at, speedup_at,
};
pub use plan::{ChartRequest, DimensionFilter, ReportOutput, ReportPlan, RequestKind};
pub use record::{BenchmarkRecord, BenchmarkReport, TimeUnit};
pub use series::{DimensionKey, Point, Series, SeriesMap, build, key_by};

// Re-export errors
#[cfg(feature = "json")]
pub use errors::LoadError;
pub use errors::{DecodeError, Diagnostic, GrammarError, PlanError};
