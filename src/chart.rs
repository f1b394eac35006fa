//! Chart descriptions handed to a rendering backend.
//!
//! The core never draws anything: a [`ChartSpec`] holds the resolved series
//! or bars, the axis formatting rules and the artifact name, and a
//! [`ChartRenderer`] turns it into pixels.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::decoder::Label;

/// Whether a chart is a line or a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// One curve per series, x = size.
    Line,
    /// Grouped bars, one group per category.
    Bar,
}

/// Scale of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisScale {
    /// Linear axis.
    #[default]
    Linear,
    /// Base-10 logarithmic axis.
    Log,
}

impl AxisScale {
    /// Returns `true` if `value` can be placed on an axis of this scale.
    #[must_use]
    pub fn fits(self, value: f64) -> bool {
        value.is_finite() && (self == Self::Linear || value > 0.0)
    }
}

/// Formats size values on the x axis of line charts.
///
/// Values below `kilo` print as integers, values below `mega` as thousands
/// (`"64 K"`), larger values as millions (`"16 M"`). Quotients are truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRule {
    /// Threshold for the `K` suffix.
    pub kilo: f64,
    /// Threshold for the `M` suffix.
    pub mega: f64,
}

impl Default for TickRule {
    fn default() -> Self {
        Self {
            kilo: 1e3,
            mega: 1e6,
        }
    }
}

impl TickRule {
    /// Short label for the x value `x`.
    #[must_use]
    pub fn format(&self, x: f64) -> String {
        if x >= self.mega {
            format!("{} M", (x / 1e6) as u64)
        } else if x >= self.kilo {
            format!("{} K", (x / 1e3) as u64)
        } else {
            format!("{}", x as u64)
        }
    }
}

/// Formats bar annotations: one decimal place plus a unit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueFormat {
    /// Suffix appended to the value, e.g. `"ms"` or `"x"`.
    pub suffix: String,
}

impl ValueFormat {
    /// Creates a format with the given suffix.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Formats `value`, e.g. `"12.3ms"`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{value:.1}{}", self.suffix)
    }
}

/// One curve of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    /// Legend label.
    pub label: Label,
    /// `(size, time)` points, ascending by size.
    pub points: Vec<(f64, f64)>,
}

/// One bar of a bar group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Method the bar belongs to.
    pub method: Label,
    /// Bar height.
    pub value: f64,
    /// Whether the value is the missing sentinel rather than a measurement.
    pub missing: bool,
    /// Formatted value drawn above the bar.
    pub annotation: String,
}

/// Bars of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    /// Category label drawn under the group.
    pub category: Label,
    /// Bars in method order; every group has the same methods.
    pub bars: Vec<Bar>,
}

/// Drawable content of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// Curves of a line chart.
    Lines(Vec<LinePlot>),
    /// Groups of a bar chart.
    Bars(Vec<BarGroup>),
}

/// A fully resolved chart, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Chart title.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// X axis scale.
    pub x_scale: AxisScale,
    /// Y axis scale.
    pub y_scale: AxisScale,
    /// Series or bars.
    pub body: ChartBody,
    /// X tick formatting of line charts.
    pub tick_rule: TickRule,
    /// Annotation format of bar charts.
    pub value_format: ValueFormat,
    /// Horizontal reference line, e.g. `1.0` on speedup charts.
    pub reference_line: Option<f64>,
    /// Artifact name without extension, unique within one run.
    pub output_name: String,
}

impl ChartSpec {
    /// Line or bar.
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self.body {
            ChartBody::Lines(_) => ChartKind::Line,
            ChartBody::Bars(_) => ChartKind::Bar,
        }
    }
}

/// Renders chart descriptions into artifacts.
pub trait ChartRenderer {
    /// Error raised by the backend.
    type Error;

    /// Draws `spec` and stores it under [`ChartSpec::output_name`].
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the chart cannot be drawn or written.
    fn render(&mut self, spec: &ChartSpec) -> Result<(), Self::Error>;
}

/// Artifact name derived from a chart title.
///
/// The title is lower-cased and every character that is neither alphanumeric
/// nor one of `-`, `.` becomes `_`, path separators included. Runs of `_` are
/// collapsed and edge underscores trimmed. Non-ASCII letters are kept.
/// A title with nothing left is named `chart`.
///
/// ```
/// use bench_charts::output_name;
///
/// assert_eq!(output_name("HashMap: Insert"), "hashmap_insert");
/// assert_eq!(output_name("Naive vs SIMD (16 M)"), "naive_vs_simd_16_m");
/// assert_eq!(output_name("Read/Write"), "read_write");
/// assert_eq!(output_name("Гистограмма яркости"), "гистограмма_яркости");
/// ```
#[must_use]
pub fn output_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() || c == '-' || c == '.' {
            name.extend(c.to_lowercase());
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
    }
    while name.ends_with('_') {
        name.pop();
    }
    if name.is_empty() {
        name.push_str("chart");
    }
    name
}

/// Allocates collision-free artifact names within one run.
///
/// The first title mapping to a name gets it unchanged; later, different
/// titles mapping to the same name get `_2`, `_3`, … in request order.
/// Asking again for a title already seen returns its earlier name.
#[derive(Debug, Clone, Default)]
pub struct OutputNames {
    taken: HashSet<String>,
    assigned: Vec<(String, String)>,
}

impl OutputNames {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the artifact name for `title`.
    pub fn assign(&mut self, title: &str) -> String {
        if let Some((_, name)) = self.assigned.iter().find(|(t, _)| t == title) {
            return name.clone();
        }
        let base = output_name(title);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.taken.insert(name.clone());
        self.assigned.push((title.into(), name.clone()));
        name
    }
}
