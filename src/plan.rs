//! Report plans: one parameterized pipeline from raw records to charts.
//!
//! A [`ReportPlan`] bundles a [`NameGrammar`] with a list of
//! [`ChartRequest`]s. Running it decodes every record once, then builds each
//! requested chart from the decoded records:
//!
//! ```text
//! records ─▶ NameDecoder ─▶ filter ─▶ SeriesBuilder ─▶ MetricEngine ─▶ ChartSpec
//! ```
//!
//! Nothing in a run is fatal except an invalid plan: undecodable records,
//! untranslated codes, missing baselines and empty charts are all reported in
//! the [`ReportOutput`].

pub mod presets;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::chart::{
    AxisScale, Bar, BarGroup, ChartBody, ChartSpec, LinePlot, OutputNames, TickRule, ValueFormat,
};
use crate::decoder::{DecodedRecord, Label, NameDecoder, SkippedRecord};
use crate::errors::{Diagnostic, PlanError};
use crate::grammar::NameGrammar;
use crate::metrics::{SizeSelector, comparison_at, speedup_at};
use crate::record::{BenchmarkRecord, TimeUnit};
use crate::series::{SeriesMap, build, key_by};

/// Placeholder replaced by the category label in scaling chart titles.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";
/// Placeholder replaced by the formatted selected size in bar chart titles.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// Keeps only records whose `dimension` has the display label `equals`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionFilter {
    /// Dimension to test.
    pub dimension: String,
    /// Required display label.
    pub equals: String,
}

impl DimensionFilter {
    fn matches(&self, record: &DecodedRecord) -> bool {
        record
            .dimension(&self.dimension)
            .is_some_and(|label| label.as_str() == self.equals)
    }
}

/// What a chart request draws.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RequestKind {
    /// Time against size, one curve per `series_by` label; one chart per
    /// `split_by` label when set.
    Scaling {
        /// Dimension whose labels become the curves.
        series_by: String,
        /// Dimension producing one chart per label.
        #[cfg_attr(feature = "serde", serde(default))]
        split_by: Option<String>,
        /// Expected `split_by` labels, in chart order. Labels without data are
        /// reported as empty, labels with data but not listed as unplotted;
        /// an empty list means "every label seen".
        #[cfg_attr(feature = "serde", serde(default))]
        categories: Vec<String>,
        /// Y axis scale.
        #[cfg_attr(feature = "serde", serde(default))]
        y_scale: AxisScale,
    },
    /// Grouped bars of every method's time per category at one size.
    Comparison {
        /// Dimension grouping the bars.
        category_dim: String,
        /// Dimension whose labels become the bars.
        method_dim: String,
        /// Size each category is compared at.
        #[cfg_attr(feature = "serde", serde(default))]
        size: SizeSelector,
    },
    /// Grouped bars of every method's speedup over a baseline.
    Speedup {
        /// Dimension grouping the bars.
        category_dim: String,
        /// Dimension whose labels become the bars.
        method_dim: String,
        /// Display label of the baseline method.
        baseline: String,
        /// Size each category is compared at.
        #[cfg_attr(feature = "serde", serde(default))]
        size: SizeSelector,
        /// Whether the baseline's own `1.0` bar is drawn.
        #[cfg_attr(feature = "serde", serde(default = "default_include_baseline"))]
        include_baseline: bool,
    },
}

#[cfg(feature = "serde")]
fn default_include_baseline() -> bool {
    true
}

/// One chart (or family of charts, for split scaling charts) of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartRequest {
    /// Title, possibly with `{category}` or `{size}` placeholders.
    pub title: String,
    /// X axis description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub x_label: String,
    /// Y axis description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub y_label: String,
    /// Display unit of times.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: TimeUnit,
    /// Records the chart is built from; all filters must match.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filters: Vec<DimensionFilter>,
    /// What to draw.
    pub kind: RequestKind,
}

impl ChartRequest {
    fn new(title: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            unit: TimeUnit::default(),
            filters: Vec::new(),
            kind,
        }
    }

    /// A line chart of time against size, one curve per `series_by` label.
    #[must_use]
    pub fn scaling(title: impl Into<String>, series_by: impl Into<String>) -> Self {
        Self::new(
            title,
            RequestKind::Scaling {
                series_by: series_by.into(),
                split_by: None,
                categories: Vec::new(),
                y_scale: AxisScale::Linear,
            },
        )
    }

    /// A grouped bar chart comparing methods per category.
    #[must_use]
    pub fn comparison(
        title: impl Into<String>,
        category_dim: impl Into<String>,
        method_dim: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            RequestKind::Comparison {
                category_dim: category_dim.into(),
                method_dim: method_dim.into(),
                size: SizeSelector::default(),
            },
        )
    }

    /// A grouped bar chart of speedups over `baseline` per category.
    #[must_use]
    pub fn speedup(
        title: impl Into<String>,
        category_dim: impl Into<String>,
        method_dim: impl Into<String>,
        baseline: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            RequestKind::Speedup {
                category_dim: category_dim.into(),
                method_dim: method_dim.into(),
                baseline: baseline.into(),
                size: SizeSelector::default(),
                include_baseline: true,
            },
        )
    }

    /// Draws one scaling chart per label of `dimension`.
    #[must_use]
    pub fn split_by(mut self, dimension: impl Into<String>) -> Self {
        if let RequestKind::Scaling { split_by, .. } = &mut self.kind {
            *split_by = Some(dimension.into());
        }
        self
    }

    /// Fixes the split labels and their order.
    #[must_use]
    pub fn categories(mut self, labels: &[&str]) -> Self {
        if let RequestKind::Scaling { categories, .. } = &mut self.kind {
            *categories = labels.iter().map(ToString::to_string).collect();
        }
        self
    }

    /// Uses a logarithmic y axis on scaling charts.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        if let RequestKind::Scaling { y_scale, .. } = &mut self.kind {
            *y_scale = AxisScale::Log;
        }
        self
    }

    /// Chooses the size bar charts compare at.
    #[must_use]
    pub fn at(mut self, selector: SizeSelector) -> Self {
        match &mut self.kind {
            RequestKind::Comparison { size, .. } | RequestKind::Speedup { size, .. } => {
                *size = selector;
            }
            RequestKind::Scaling { .. } => {}
        }
        self
    }

    /// Leaves the baseline's own bar out of a speedup chart.
    #[must_use]
    pub fn without_baseline(mut self) -> Self {
        if let RequestKind::Speedup {
            include_baseline, ..
        } = &mut self.kind
        {
            *include_baseline = false;
        }
        self
    }

    /// Keeps only records whose `dimension` is labelled `equals`.
    #[must_use]
    pub fn filter(mut self, dimension: impl Into<String>, equals: impl Into<String>) -> Self {
        self.filters.push(DimensionFilter {
            dimension: dimension.into(),
            equals: equals.into(),
        });
        self
    }

    /// Sets the axis descriptions.
    #[must_use]
    pub fn axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Sets the display unit of times.
    #[must_use]
    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Dimensions this request reads.
    fn dimensions(&self) -> Vec<&str> {
        let mut dimensions: Vec<&str> = self.filters.iter().map(|f| f.dimension.as_str()).collect();
        match &self.kind {
            RequestKind::Scaling {
                series_by,
                split_by,
                ..
            } => {
                dimensions.push(series_by);
                dimensions.extend(split_by.as_deref());
            }
            RequestKind::Comparison {
                category_dim,
                method_dim,
                ..
            }
            | RequestKind::Speedup {
                category_dim,
                method_dim,
                ..
            } => {
                dimensions.push(category_dim);
                dimensions.push(method_dim);
            }
        }
        dimensions
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    /// Charts in request order.
    pub charts: Vec<ChartSpec>,
    /// Records that could not be decoded, with the reason.
    pub skipped: Vec<SkippedRecord>,
    /// Non-fatal conditions, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl ReportOutput {
    /// Artifact names of the produced charts, in chart order.
    pub fn artifact_names(&self) -> impl Iterator<Item = &str> {
        self.charts.iter().map(|chart| chart.output_name.as_str())
    }
}

/// A grammar plus the charts to draw from the records it decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportPlan {
    /// How benchmark names are decoded.
    pub grammar: NameGrammar,
    /// Charts in output order.
    pub charts: Vec<ChartRequest>,
}

impl ReportPlan {
    /// Creates a plan without charts.
    #[must_use]
    pub fn new(grammar: NameGrammar) -> Self {
        Self {
            grammar,
            charts: Vec::new(),
        }
    }

    /// Appends a chart request.
    #[must_use]
    pub fn chart(mut self, request: ChartRequest) -> Self {
        self.charts.push(request);
        self
    }

    /// Checks the grammar and every dimension the requests reference.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Grammar`] for an invalid grammar and
    /// [`PlanError::UnknownDimension`] for a request reading an undeclared
    /// dimension.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.grammar.validate()?;
        for request in &self.charts {
            if let Some(dimension) = request
                .dimensions()
                .into_iter()
                .find(|d| self.grammar.dimension_spec(d).is_none())
            {
                return Err(PlanError::UnknownDimension {
                    chart: request.title.clone(),
                    dimension: dimension.into(),
                });
            }
        }
        Ok(())
    }

    /// Runs the plan over the records of one report document.
    ///
    /// Identical input always produces identical output, artifact names
    /// included.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if the plan itself is invalid; record-level
    /// problems never fail the run.
    pub fn run(&self, records: &[BenchmarkRecord]) -> Result<ReportOutput, PlanError> {
        self.validate()?;
        let decoder = NameDecoder::new(&self.grammar)?;
        let decoded = decoder.decode_all(records);

        let mut output = ReportOutput {
            charts: Vec::new(),
            skipped: decoded.skipped,
            diagnostics: decoded.diagnostics,
        };
        let mut names = OutputNames::new();

        for request in &self.charts {
            let selected: Vec<DecodedRecord> = decoded
                .records
                .iter()
                .filter(|record| request.filters.iter().all(|f| f.matches(record)))
                .cloned()
                .collect();
            let mut builder = ChartsBuilder {
                request,
                names: &mut names,
                output: &mut output,
            };
            match &request.kind {
                RequestKind::Scaling {
                    series_by,
                    split_by,
                    categories,
                    y_scale,
                } => builder.scaling(
                    &selected,
                    series_by,
                    split_by.as_deref(),
                    categories,
                    *y_scale,
                ),
                RequestKind::Comparison {
                    category_dim,
                    method_dim,
                    size,
                } => builder.comparison(&selected, category_dim, method_dim, *size),
                RequestKind::Speedup {
                    category_dim,
                    method_dim,
                    baseline,
                    size,
                    include_baseline,
                } => builder.speedup(
                    &selected,
                    category_dim,
                    method_dim,
                    &Label::from(baseline.as_str()),
                    *size,
                    *include_baseline,
                ),
            }
        }
        Ok(output)
    }
}

/// Builds the charts of one request into the run output.
struct ChartsBuilder<'r, 'o> {
    request: &'r ChartRequest,
    names: &'o mut OutputNames,
    output: &'o mut ReportOutput,
}

impl ChartsBuilder<'_, '_> {
    fn push(&mut self, title: String, body: ChartBody, y_scale: AxisScale, format: ValueFormat) {
        let output_name = self.names.assign(&title);
        let reference_line = match self.request.kind {
            RequestKind::Speedup { .. } => Some(1.0),
            _ => None,
        };
        self.output.charts.push(ChartSpec {
            title,
            x_label: self.request.x_label.clone(),
            y_label: self.request.y_label.clone(),
            x_scale: match body {
                ChartBody::Lines(_) => AxisScale::Log,
                ChartBody::Bars(_) => AxisScale::Linear,
            },
            y_scale,
            body,
            tick_rule: TickRule::default(),
            value_format: format,
            reference_line,
            output_name,
        });
    }

    fn empty(&mut self, chart: String, category: Option<Label>) {
        self.output
            .diagnostics
            .push(Diagnostic::EmptySeries { chart, category });
    }

    fn scaling(
        &mut self,
        records: &[DecodedRecord],
        series_by: &str,
        split_by: Option<&str>,
        categories: &[String],
        y_scale: AxisScale,
    ) {
        let unit = self.request.unit;
        let Some(split_by) = split_by else {
            let series = build(records, key_by(&[series_by]));
            let title = self.request.title.clone();
            let plots = lines(&series, series_by, unit, y_scale);
            if plots.is_empty() {
                self.empty(title, None);
            } else {
                let format = ValueFormat::new(unit.suffix());
                self.push(title, ChartBody::Lines(plots), y_scale, format);
            }
            return;
        };

        let series = build(records, key_by(&[split_by, series_by]));
        let mut seen: Vec<Label> = Vec::new();
        for key in series.keys() {
            let label = key.get(split_by).cloned().unwrap_or(Label::Empty);
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        let labels: Vec<Label> = if categories.is_empty() {
            seen
        } else {
            let labels: Vec<Label> = categories
                .iter()
                .map(|category| Label::from(category.as_str()))
                .collect();
            for category in seen.into_iter().filter(|label| !labels.contains(label)) {
                self.output.diagnostics.push(Diagnostic::UnplottedCategory {
                    chart: self.request.title.clone(),
                    category,
                });
            }
            labels
        };

        for label in labels {
            let title = self
                .request
                .title
                .replace(CATEGORY_PLACEHOLDER, label.as_str());
            let subset: SeriesMap = series
                .iter()
                .filter(|(key, _)| key.get(split_by) == Some(&label))
                .map(|(key, series)| (key.clone(), series.clone()))
                .collect();
            let plots = lines(&subset, series_by, unit, y_scale);
            if plots.is_empty() {
                self.empty(title, Some(label));
                continue;
            }
            let format = ValueFormat::new(unit.suffix());
            self.push(title, ChartBody::Lines(plots), y_scale, format);
        }
    }

    fn comparison(
        &mut self,
        records: &[DecodedRecord],
        category_dim: &str,
        method_dim: &str,
        size: SizeSelector,
    ) {
        let unit = self.request.unit;
        let format = ValueFormat::new(unit.suffix());
        let series = build(records, key_by(&[category_dim, method_dim]));
        let metrics = comparison_at(&series, size, category_dim, method_dim);
        let title = self.title_at(metrics.rows.iter().map(|row| row.size).max());

        for category in metrics.empty {
            self.empty(title.clone(), Some(category));
        }
        if metrics.rows.is_empty() {
            self.empty(title, None);
            return;
        }

        let groups = metrics
            .rows
            .iter()
            .map(|row| BarGroup {
                category: row.category.clone(),
                bars: row
                    .values
                    .iter()
                    .map(|(method, time)| {
                        let missing = row.is_missing(method);
                        bar(method.clone(), unit.from_nanos(*time), missing, &format)
                    })
                    .collect(),
            })
            .collect();
        self.push(title, ChartBody::Bars(groups), AxisScale::Linear, format);
    }

    fn speedup(
        &mut self,
        records: &[DecodedRecord],
        category_dim: &str,
        method_dim: &str,
        baseline: &Label,
        size: SizeSelector,
        include_baseline: bool,
    ) {
        let format = ValueFormat::new("x");
        let series = build(records, key_by(&[category_dim, method_dim]));
        let metrics = speedup_at(&series, size, category_dim, method_dim, baseline);
        let title = self.title_at(metrics.rows.iter().map(|row| row.size).max());

        for category in metrics.missing_baseline {
            self.output.diagnostics.push(Diagnostic::MissingBaseline {
                chart: title.clone(),
                category,
                baseline: baseline.clone(),
            });
        }
        for category in metrics.empty {
            self.empty(title.clone(), Some(category));
        }
        if metrics.rows.is_empty() {
            self.empty(title, None);
            return;
        }

        let groups = metrics
            .rows
            .iter()
            .map(|row| BarGroup {
                category: row.category.clone(),
                bars: row
                    .ratios
                    .iter()
                    .filter(|(method, _)| include_baseline || *method != baseline)
                    .map(|(method, ratio)| {
                        bar(method.clone(), *ratio, row.is_missing(method), &format)
                    })
                    .collect(),
            })
            .collect();
        self.push(title, ChartBody::Bars(groups), AxisScale::Linear, format);
    }

    /// Title with the `{size}` placeholder resolved.
    fn title_at(&self, size: Option<u64>) -> String {
        match size {
            Some(size) => self
                .request
                .title
                .replace(SIZE_PLACEHOLDER, &TickRule::default().format(size as f64)),
            None => self.request.title.clone(),
        }
    }
}

/// Curves of a scaling chart. The x axis is logarithmic, so are the y values
/// when `y_scale` is: points that cannot be placed there are left out, and so
/// are curves left without points.
fn lines(
    series: &SeriesMap,
    series_by: &str,
    unit: TimeUnit,
    y_scale: AxisScale,
) -> Vec<LinePlot> {
    series
        .iter()
        .map(|(key, series)| LinePlot {
            label: key.get(series_by).cloned().unwrap_or(Label::Empty),
            points: series
                .points()
                .iter()
                .map(|point| (point.size as f64, unit.from_nanos(point.real_time)))
                .filter(|&(x, y)| AxisScale::Log.fits(x) && y_scale.fits(y))
                .collect(),
        })
        .filter(|line| !line.points.is_empty())
        .collect()
}

fn bar(method: Label, value: f64, missing: bool, format: &ValueFormat) -> Bar {
    Bar {
        method,
        value,
        missing,
        annotation: format.format(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Field;
    use alloc::vec;

    fn grammar() -> NameGrammar {
        NameGrammar::new("histogram", "1")
            .dimension("family", 1)
            .dimension("method", 2)
            .compound("scenario", &[Field::optional(3)])
    }

    fn records() -> Vec<BenchmarkRecord> {
        vec![
            BenchmarkRecord::new("BM_Histogram_Naive_Random/4096", 200.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Random/4096", 50.0),
            BenchmarkRecord::new("BM_Histogram_Naive_Uniform/4096", 100.0),
            BenchmarkRecord::new("BM_Histogram_Naive_Random/1024", 20.0),
            BenchmarkRecord::new("BM_ThreadPool_Overhead", 5.0),
        ]
    }

    #[test]
    fn test_scaling_split_by_category() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::scaling("Histogram: {category}", "method")
                .split_by("scenario")
                .categories(&["Random", "Uniform", "Gradient"]),
        );
        let output = plan.run(&records()).unwrap();

        assert_eq!(
            output.artifact_names().collect::<Vec<_>>(),
            vec!["histogram_random", "histogram_uniform"]
        );
        assert_eq!(
            output.skipped,
            vec![SkippedRecord {
                name: "BM_ThreadPool_Overhead".into(),
                error: crate::DecodeError::MalformedSize("BM_ThreadPool_Overhead".into()),
            }]
        );
        assert!(output.diagnostics.contains(&Diagnostic::EmptySeries {
            chart: "Histogram: Gradient".into(),
            category: Some(Label::from("Gradient")),
        }));

        let ChartBody::Lines(lines) = &output.charts[0].body else {
            panic!("expected a line chart");
        };
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, Label::from("Naive"));
        assert_eq!(lines[0].points, vec![(1024.0, 20.0), (4096.0, 200.0)]);
        assert_eq!(output.charts[0].x_scale, AxisScale::Log);
    }

    #[test]
    fn test_comparison_and_speedup_charts() {
        let plan = ReportPlan::new(grammar())
            .chart(
                ChartRequest::comparison("Naive vs SIMD ({size})", "scenario", "method")
                    .unit(TimeUnit::Nanoseconds),
            )
            .chart(ChartRequest::speedup(
                "Speedup at {size}",
                "scenario",
                "method",
                "Naive",
            ));
        let output = plan.run(&records()).unwrap();
        assert_eq!(output.charts.len(), 2);

        let comparison = &output.charts[0];
        assert_eq!(comparison.title, "Naive vs SIMD (4 K)");
        let ChartBody::Bars(groups) = &comparison.body else {
            panic!("expected a bar chart");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].category, Label::from("Uniform"));
        assert!(groups[1].bars[1].missing);
        assert_eq!(groups[1].bars[1].annotation, "0.0ns");

        let speedup = &output.charts[1];
        assert_eq!(speedup.reference_line, Some(1.0));
        let ChartBody::Bars(groups) = &speedup.body else {
            panic!("expected a bar chart");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].bars[0].annotation, "1.0x");
        assert_eq!(groups[0].bars[1].annotation, "4.0x");
    }

    #[test]
    fn test_speedup_reports_missing_baseline() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::speedup("Speedup", "scenario", "method", "Naive").without_baseline(),
        );
        let records = vec![
            BenchmarkRecord::new("BM_Histogram_Naive_Random/64", 8.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Random/64", 2.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Gradient/64", 2.0),
        ];
        let output = plan.run(&records).unwrap();
        assert!(output.diagnostics.contains(&Diagnostic::MissingBaseline {
            chart: "Speedup".into(),
            category: Label::from("Gradient"),
            baseline: Label::from("Naive"),
        }));
        let ChartBody::Bars(groups) = &output.charts[0].body else {
            panic!("expected a bar chart");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bars.len(), 1);
        assert_eq!(groups[0].bars[0].method, Label::from("SIMD"));
    }

    #[test]
    fn test_filters_and_empty_chart() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::scaling("Thread pool", "method").filter("family", "ThreadPool"),
        );
        let output = plan.run(&records()).unwrap();
        assert!(output.charts.is_empty());
        assert!(output.diagnostics.contains(&Diagnostic::EmptySeries {
            chart: "Thread pool".into(),
            category: None,
        }));
    }

    #[test]
    fn test_unknown_dimension_is_rejected() {
        let plan =
            ReportPlan::new(grammar()).chart(ChartRequest::scaling("Broken", "operation"));
        assert_eq!(
            plan.run(&records()),
            Err(PlanError::UnknownDimension {
                chart: "Broken".into(),
                dimension: "operation".into(),
            })
        );
    }

    #[test]
    fn test_measured_zero_bar_is_drawn() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::comparison("Comparison", "scenario", "method")
                .unit(TimeUnit::Nanoseconds),
        );
        let records = vec![
            BenchmarkRecord::new("BM_Histogram_Naive_Random/64", 0.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Random/64", 5.0),
            BenchmarkRecord::new("BM_Histogram_Naive_Uniform/64", 3.0),
        ];
        let output = plan.run(&records).unwrap();
        let ChartBody::Bars(groups) = &output.charts[0].body else {
            panic!("expected a bar chart");
        };
        assert_eq!(groups[0].bars[0].method, Label::from("Naive"));
        assert!(!groups[0].bars[0].missing);
        assert_eq!(groups[0].bars[0].annotation, "0.0ns");
        // Not measured at all: same value, but flagged.
        assert_eq!(groups[1].bars[1].method, Label::from("SIMD"));
        assert!(groups[1].bars[1].missing);
    }

    #[test]
    fn test_unlisted_category_is_reported() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::scaling("Histogram: {category}", "method")
                .split_by("scenario")
                .categories(&["Random"]),
        );
        let output = plan.run(&records()).unwrap();
        assert_eq!(
            output.artifact_names().collect::<Vec<_>>(),
            vec!["histogram_random"]
        );
        assert_eq!(
            output.diagnostics,
            vec![
                Diagnostic::UntranslatedDimension {
                    dimension: "family".into(),
                    raw: "Histogram".into(),
                },
                Diagnostic::UntranslatedDimension {
                    dimension: "method".into(),
                    raw: "Naive".into(),
                },
                Diagnostic::UntranslatedDimension {
                    dimension: "scenario".into(),
                    raw: "Random".into(),
                },
                Diagnostic::UntranslatedDimension {
                    dimension: "method".into(),
                    raw: "SIMD".into(),
                },
                Diagnostic::UntranslatedDimension {
                    dimension: "scenario".into(),
                    raw: "Uniform".into(),
                },
                Diagnostic::UnplottedCategory {
                    chart: "Histogram: {category}".into(),
                    category: Label::from("Uniform"),
                },
            ]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_request_defaults_match_builder() {
        let request: ChartRequest = serde_json::from_str(
            r#"{"title": "Speedup", "kind": {"speedup": {
                "category_dim": "scenario", "method_dim": "method", "baseline": "Naive"
            }}}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            ChartRequest::speedup("Speedup", "scenario", "method", "Naive")
        );

        let request: ChartRequest = serde_json::from_str(
            r#"{"title": "Scaling", "kind": {"scaling": {"series_by": "method"}}}"#,
        )
        .unwrap();
        assert_eq!(request, ChartRequest::scaling("Scaling", "method"));
    }

    #[test]
    fn test_undrawable_log_points_are_dropped() {
        let plan = ReportPlan::new(grammar()).chart(
            ChartRequest::scaling("Histogram: {category}", "method")
                .split_by("scenario")
                .log_y(),
        );
        let records = vec![
            BenchmarkRecord::new("BM_Histogram_Naive_Random/64", 2.0),
            BenchmarkRecord::new("BM_Histogram_Naive_Random/128", 0.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Random/0", 1.0),
            BenchmarkRecord::new("BM_Histogram_Naive_Gradient/64", 0.0),
            BenchmarkRecord::new("BM_Histogram_SIMD_Gradient/64", 0.0),
        ];
        let output = plan.run(&records).unwrap();
        assert_eq!(
            output.artifact_names().collect::<Vec<_>>(),
            vec!["histogram_random"]
        );
        let ChartBody::Lines(lines) = &output.charts[0].body else {
            panic!("expected a line chart");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points, vec![(64.0, 2.0)]);
        assert!(output.diagnostics.contains(&Diagnostic::EmptySeries {
            chart: "Histogram: Gradient".into(),
            category: Some(Label::from("Gradient")),
        }));
    }

    #[test]
    fn test_run_is_idempotent() {
        let plan = ReportPlan::new(grammar())
            .chart(ChartRequest::scaling("Histogram: {category}", "method").split_by("scenario"))
            .chart(ChartRequest::comparison("Comparison", "scenario", "method"));
        assert_eq!(plan.run(&records()), plan.run(&records()));
    }
}
