//! Built-in report plans for the benchmark suites this crate was written for.
//!
//! Each preset pairs the naming convention of one suite with the charts its
//! report contains. They double as examples for writing custom plans.

use crate::grammar::{Field, NameGrammar};
use crate::metrics::SizeSelector;
use crate::plan::{ChartRequest, ReportPlan};
use crate::record::TimeUnit;

/// Names of the built-in presets, as accepted by [`by_name`].
pub const NAMES: &[&str] = &["hashmap", "histogram-simd", "histogram-parallel"];

/// Looks up a preset by name.
#[must_use]
pub fn by_name(name: &str) -> Option<ReportPlan> {
    match name {
        "hashmap" => Some(hashmap()),
        "histogram-simd" => Some(histogram_simd()),
        "histogram-parallel" => Some(histogram_parallel()),
        _ => None,
    }
}

/// `BM_HashMap_<Set|Get|Delete>_<No|Many|Random>_Collisions/<elements>`.
#[must_use]
pub fn hashmap_grammar() -> NameGrammar {
    NameGrammar::new("hashmap", "1")
        .dimension("family", 1)
        .dimension("operation", 2)
        .compound("scenario", &[Field::required(3), Field::optional(4)])
        .label("family", "HashMap", "HashMap")
        .label("operation", "Set", "Insert")
        .label("operation", "Get", "Search")
        .label("operation", "Delete", "Delete")
        .label("scenario", "No_Collisions", "NoCollisions")
        .label("scenario", "Many_Collisions", "ManyCollisions")
        .label("scenario", "Random_Collisions", "RandomCollisions")
}

/// One scaling chart per operation, one curve per collision scenario.
#[must_use]
pub fn hashmap() -> ReportPlan {
    ReportPlan::new(hashmap_grammar()).chart(
        ChartRequest::scaling("HashMap: {category}", "scenario")
            .split_by("operation")
            .categories(&["Insert", "Search", "Delete"])
            .axes("Number of elements", "Time (ns per iteration)")
            .unit(TimeUnit::Nanoseconds),
    )
}

/// `BM_Histogram_<Naive|SIMD>_<Random|Uniform|Gradient>/<bytes>`.
#[must_use]
pub fn histogram_simd_grammar() -> NameGrammar {
    NameGrammar::new("histogram-simd", "1")
        .dimension("family", 1)
        .dimension("method", 2)
        .dimension("scenario", 3)
        .label("family", "Histogram", "Histogram")
        .label("method", "Naive", "Naive")
        .label("method", "SIMD", "SIMD")
        .label("scenario", "Random", "Random data")
        .label("scenario", "Uniform", "Uniform data")
        .label("scenario", "Gradient", "Gradient")
}

/// Scaling per data scenario, then Naive against SIMD at the largest image.
#[must_use]
pub fn histogram_simd() -> ReportPlan {
    ReportPlan::new(histogram_simd_grammar())
        .chart(
            ChartRequest::scaling("Brightness histogram: {category}", "method")
                .split_by("scenario")
                .categories(&["Random data", "Uniform data", "Gradient"])
                .log_y()
                .axes("Image size (bytes)", "Time (ms)")
                .unit(TimeUnit::Milliseconds),
        )
        .chart(
            ChartRequest::comparison("Naive vs SIMD ({size})", "scenario", "method")
                .at(SizeSelector::MaxOverall)
                .axes("Scenario", "Time (ms)")
                .unit(TimeUnit::Milliseconds),
        )
        .chart(
            ChartRequest::speedup("SIMD speedup over Naive ({size})", "scenario", "method", "Naive")
                .at(SizeSelector::MaxOverall)
                .without_baseline()
                .axes("Scenario", "Speedup (x)"),
        )
}

/// `BM_Histogram_<Naive|Parallel_<2|4|8|Auto>>/<bytes>` and
/// `BM_ThreadPool_<Batch|Overhead>[/<tasks>]`.
#[must_use]
pub fn histogram_parallel_grammar() -> NameGrammar {
    NameGrammar::new("histogram-parallel", "1")
        .dimension("family", 1)
        .compound("method", &[Field::required(2), Field::optional(3)])
        .label("family", "Histogram", "Histogram")
        .label("family", "ThreadPool", "ThreadPool")
        .label("method", "Naive", "Naive (1 thread)")
        .label("method", "Parallel_2", "Parallel (2 threads)")
        .label("method", "Parallel_4", "Parallel (4 threads)")
        .label("method", "Parallel_8", "Parallel (8 threads)")
        .label("method", "Parallel_Auto", "Parallel (auto)")
        .label("method", "Batch", "Batch")
}

/// Multithreaded histogram versions against the single-threaded baseline,
/// plus the thread pool batch timings.
#[must_use]
pub fn histogram_parallel() -> ReportPlan {
    ReportPlan::new(histogram_parallel_grammar())
        .chart(
            ChartRequest::scaling("Brightness histogram: multithreaded versions", "method")
                .filter("family", "Histogram")
                .log_y()
                .axes("Image size (bytes)", "Time (ms)")
                .unit(TimeUnit::Milliseconds),
        )
        .chart(
            ChartRequest::comparison("Histogram processing time ({size})", "family", "method")
                .filter("family", "Histogram")
                .at(SizeSelector::MaxOverall)
                .axes("Method", "Time (ms)")
                .unit(TimeUnit::Milliseconds),
        )
        .chart(
            ChartRequest::speedup(
                "Speedup over Naive ({size})",
                "family",
                "method",
                "Naive (1 thread)",
            )
            .filter("family", "Histogram")
            .at(SizeSelector::MaxOverall)
            .without_baseline()
            .axes("Method", "Speedup (x)"),
        )
        .chart(
            ChartRequest::scaling("ThreadPool: batch execution time", "method")
                .filter("family", "ThreadPool")
                .filter("method", "Batch")
                .axes("Batch size", "Time (µs)")
                .unit(TimeUnit::Microseconds),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for name in NAMES {
            let plan = by_name(name).unwrap();
            assert_eq!(plan.validate(), Ok(()), "{name}");
        }
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn test_hashmap_labels() {
        let grammar = hashmap_grammar();
        assert_eq!(
            grammar.labels.translate("scenario", "Many_Collisions"),
            Some("ManyCollisions")
        );
        assert_eq!(grammar.labels.translate("operation", "Get"), Some("Search"));
    }
}
