//! Raw benchmark records as emitted by the benchmarking harness.
//!
//! The report document follows the Google Benchmark JSON layout: a top-level
//! `benchmarks` array whose entries carry at least `name` and `real_time`.
//! Every other field of the harness output is ignored.
//!
//! # Example
//!
//! ```
//! use bench_charts::{BenchmarkReport, TimeUnit};
//!
//! let json = r#"{"benchmarks":[{"name":"BM_Histogram_Naive/4096","real_time":1.5,"time_unit":"us","iterations":1000}]}"#;
//! let report = BenchmarkReport::from_json(json).unwrap();
//!
//! assert_eq!(report.benchmarks[0].time_unit, Some(TimeUnit::Microseconds));
//! assert!((report.benchmarks[0].real_time_ns() - 1500.0).abs() < 1e-9);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Unit of a measured time, matching the harness' `time_unit` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Nanoseconds (`"ns"`), the harness default.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ns"))]
    Nanoseconds,
    /// Microseconds (`"us"`).
    #[cfg_attr(feature = "serde", serde(rename = "us"))]
    Microseconds,
    /// Milliseconds (`"ms"`).
    #[cfg_attr(feature = "serde", serde(rename = "ms"))]
    Milliseconds,
    /// Seconds (`"s"`).
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    Seconds,
}

impl TimeUnit {
    /// Number of nanoseconds in one unit.
    #[must_use]
    pub const fn nanos(self) -> f64 {
        match self {
            Self::Nanoseconds => 1.0,
            Self::Microseconds => 1_000.0,
            Self::Milliseconds => 1_000_000.0,
            Self::Seconds => 1_000_000_000.0,
        }
    }

    /// Converts a duration in nanoseconds into this unit.
    #[must_use]
    pub fn from_nanos(self, nanos: f64) -> f64 {
        nanos / self.nanos()
    }

    /// Short suffix used on axis labels and bar annotations.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }
}

/// One measured benchmark, immutable once read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkRecord {
    /// Encoded benchmark name, e.g. `"BM_HashMap_Get_No_Collisions/1024"`.
    pub name: String,
    /// Wall-clock time per iteration, in [`time_unit`](Self::time_unit).
    pub real_time: f64,
    /// Number of iterations the harness ran.
    #[cfg_attr(feature = "serde", serde(default))]
    pub iterations: Option<u64>,
    /// Unit of `real_time`; nanoseconds when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_unit: Option<TimeUnit>,
}

impl BenchmarkRecord {
    /// Creates a record measured in nanoseconds.
    #[must_use]
    pub fn new(name: impl Into<String>, real_time: f64) -> Self {
        Self {
            name: name.into(),
            real_time,
            iterations: None,
            time_unit: None,
        }
    }

    /// Sets the time unit of `real_time`.
    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = Some(unit);
        self
    }

    /// `real_time` normalized to nanoseconds.
    #[must_use]
    pub fn real_time_ns(&self) -> f64 {
        self.real_time * self.time_unit.unwrap_or_default().nanos()
    }
}

/// A whole benchmark report document.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    /// Records in document order.
    pub benchmarks: Vec<BenchmarkRecord>,
}

#[cfg(feature = "json")]
impl BenchmarkReport {
    /// Parses a report document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidDocument`](crate::LoadError::InvalidDocument)
    /// if the input is not JSON, has no `benchmarks` array, or an entry lacks
    /// `name` or `real_time`.
    pub fn from_json(json: &str) -> Result<Self, crate::LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        let d = a - b;
        d < 1e-9 && d > -1e-9
    }

    #[test]
    fn test_load_minimal_document() {
        let report =
            BenchmarkReport::from_json(r#"{"benchmarks":[{"name":"BM_A_B/8","real_time":12.5}]}"#)
                .unwrap();
        assert_eq!(report.benchmarks.len(), 1);
        assert_eq!(report.benchmarks[0].name, "BM_A_B/8");
        assert_eq!(report.benchmarks[0].iterations, None);
        assert_eq!(report.benchmarks[0].time_unit, None);
        assert!(close(report.benchmarks[0].real_time_ns(), 12.5));
    }

    #[test]
    fn test_load_ignores_unknown_fields() {
        let json = r#"{
            "context": {"num_cpus": 8},
            "benchmarks": [{
                "name": "BM_A_B/8",
                "run_name": "BM_A_B/8",
                "run_type": "iteration",
                "iterations": 4096,
                "real_time": 3.0,
                "cpu_time": 2.9,
                "time_unit": "ms"
            }]
        }"#;
        let report = BenchmarkReport::from_json(json).unwrap();
        let record = &report.benchmarks[0];
        assert_eq!(record.iterations, Some(4096));
        assert_eq!(record.time_unit, Some(TimeUnit::Milliseconds));
        assert!(close(record.real_time_ns(), 3_000_000.0));
    }

    #[test]
    fn test_missing_benchmarks_is_fatal() {
        assert!(BenchmarkReport::from_json(r#"{"context":{}}"#).is_err());
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        assert!(BenchmarkReport::from_json("{not json").is_err());
    }

    #[test]
    fn test_time_unit_conversions() {
        assert!(close(TimeUnit::Milliseconds.from_nanos(16_000_000.0), 16.0));
        assert!(close(TimeUnit::Seconds.from_nanos(2_500_000_000.0), 2.5));
        assert_eq!(TimeUnit::Microseconds.suffix(), "µs");
    }
}
