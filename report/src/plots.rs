//! SVG rendering of chart descriptions.
//!
//! Line charts draw one curve per series with dots on the measured sizes;
//! bar charts draw one cluster per category with the value annotated on top
//! of every bar. Logarithmic axes use plotters' `log_scale()` ranges.

use std::ops::Range;
use std::path::{Path, PathBuf};

use bench_charts::{AxisScale, BarGroup, ChartBody, ChartRenderer, ChartSpec, LinePlot};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Palette, assigned to series and methods in order
// ---------------------------------------------------------------------------

const PALETTE: [RGBColor; 8] = [
    RGBColor(52, 152, 219),  //  blue
    RGBColor(231, 76, 60),   //  red
    RGBColor(46, 204, 113),  //  emerald
    RGBColor(230, 160, 0),   //  amber
    RGBColor(155, 89, 182),  //  purple
    RGBColor(26, 188, 156),  //  teal
    RGBColor(52, 73, 94),    //  slate
    RGBColor(211, 84, 0),    //  pumpkin
];

fn color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Axis bounds around `lo..=hi`, with room for markers and annotations.
fn padded(lo: f64, hi: f64, scale: AxisScale) -> Range<f64> {
    match scale {
        AxisScale::Log => (lo / 1.5)..(hi * 1.5),
        AxisScale::Linear => lo.min(0.0)..if hi > 0.0 { hi * 1.15 } else { 1.0 },
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Short y tick label.
fn y_fmt(value: f64) -> String {
    if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Writes every chart to `<output_dir>/<output_name>.svg`.
#[derive(Debug)]
pub struct SvgRenderer {
    output_dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl SvgRenderer {
    /// Creates a renderer writing into `output_dir`, created on first use.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            saved: Vec::new(),
        }
    }

    /// Files written so far, in render order.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Artifact names of the files written so far, in render order.
    pub fn artifact_names(&self) -> Vec<String> {
        self.saved
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect()
    }
}

impl ChartRenderer for SvgRenderer {
    type Error = Box<dyn std::error::Error>;

    fn render(&mut self, spec: &ChartSpec) -> Result<(), Self::Error> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.svg", spec.output_name));
        let drawn = match &spec.body {
            ChartBody::Lines(lines) => line_chart(spec, lines, &path)?,
            ChartBody::Bars(groups) => bar_chart(spec, groups, &path)?,
        };
        if !drawn {
            debug!("Nothing drawable in {}", spec.title);
            return Ok(());
        }
        info!("Saved: {}", path.display());
        self.saved.push(path);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Line chart: time against size, one curve per series
// ---------------------------------------------------------------------------

/// Returns `false` without writing anything when no point is drawable.
fn line_chart(
    spec: &ChartSpec,
    lines: &[LinePlot],
    output: &Path,
) -> Result<bool, Box<dyn std::error::Error>> {
    let points: Vec<(f64, f64)> = lines
        .iter()
        .flat_map(|line| drawable(line, spec.x_scale, spec.y_scale))
        .collect();
    let Some((x_lo, x_hi)) = min_max(points.iter().map(|(x, _)| *x)) else {
        return Ok(false);
    };
    let (y_lo, y_hi) = min_max(points.iter().map(|(_, y)| *y)).unwrap_or((0.0, 1.0));
    let x_range = padded(x_lo, x_hi, spec.x_scale);
    let y_range = padded(y_lo, y_hi, spec.y_scale);

    let root = SVGBackend::new(output, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    match (spec.x_scale, spec.y_scale) {
        (AxisScale::Log, AxisScale::Log) => {
            draw_lines(&root, spec, lines, x_range.log_scale(), y_range.log_scale())?;
        }
        (AxisScale::Log, AxisScale::Linear) => {
            draw_lines(&root, spec, lines, x_range.log_scale(), y_range)?;
        }
        (AxisScale::Linear, AxisScale::Log) => {
            draw_lines(&root, spec, lines, x_range, y_range.log_scale())?;
        }
        (AxisScale::Linear, AxisScale::Linear) => {
            draw_lines(&root, spec, lines, x_range, y_range)?;
        }
    }

    root.present()?;
    Ok(true)
}

/// Points of `line` that fit both axes.
fn drawable(
    line: &LinePlot,
    x_scale: AxisScale,
    y_scale: AxisScale,
) -> impl Iterator<Item = (f64, f64)> + '_ {
    line.points
        .iter()
        .copied()
        .filter(move |&(x, y)| x_scale.fits(x) && y_scale.fits(y))
}

/// Draws the curves on whatever pair of axis ranges the scales call for.
fn draw_lines<X, Y>(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    spec: &ChartSpec,
    lines: &[LinePlot],
    x_spec: X,
    y_spec: Y,
) -> Result<(), Box<dyn std::error::Error>>
where
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 18))
        .margin(14)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_spec, y_spec)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .x_label_formatter(&|x: &f64| spec.tick_rule.format(*x))
        .y_label_formatter(&|y: &f64| y_fmt(*y))
        .draw()?;

    for (index, line) in lines.iter().enumerate() {
        let color = color(index);
        let xy: Vec<(f64, f64)> = drawable(line, spec.x_scale, spec.y_scale).collect();
        if xy.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(xy.clone(), color.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            xy.iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(12)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Bar chart: one cluster per category, one bar per method
// ---------------------------------------------------------------------------

/// Returns `false` without writing anything when there are no groups.
fn bar_chart(
    spec: &ChartSpec,
    groups: &[BarGroup],
    output: &Path,
) -> Result<bool, Box<dyn std::error::Error>> {
    if groups.is_empty() {
        return Ok(false);
    }
    let n = groups.len();
    let methods = groups[0].bars.len().max(1);
    let bar_width = 0.8 / methods as f64;

    let y_max = groups
        .iter()
        .flat_map(|group| group.bars.iter().map(|bar| bar.value))
        .chain(spec.reference_line)
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.2 } else { 1.0 };

    let root = SVGBackend::new(output, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 18))
        .margin(14)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..n as f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .y_label_formatter(&|y| y_fmt(*y))
        .x_label_formatter(&|x| {
            // Only label at cluster centers (0.5, 1.5, …).
            let centered = x - 0.5;
            if (centered - centered.round()).abs() > 0.1 || centered < 0.0 {
                return String::new();
            }
            groups
                .get(centered.round() as usize)
                .map(|group| group.category.to_string())
                .unwrap_or_default()
        })
        .draw()?;

    for (i, group) in groups.iter().enumerate() {
        for (j, bar) in group.bars.iter().enumerate() {
            let x0 = i as f64 + 0.1 + j as f64 * bar_width;
            let x1 = x0 + bar_width - 0.02;
            let x_mid = (x0 + x1) / 2.0;
            if !bar.missing {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x0, 0.0), (x1, bar.value)],
                    color(j).mix(0.8).filled(),
                )))?;
            }
            chart.draw_series(std::iter::once(Text::new(
                bar.annotation.clone(),
                (x_mid, bar.value + y_max * 0.01),
                ("sans-serif", 12)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )))?;
        }
    }

    // Legend entries, one per method.
    for (j, bar) in groups[0].bars.iter().enumerate() {
        let color = color(j);
        chart
            .draw_series(std::iter::once(Circle::new((0.0, 0.0), 0, color.filled())))?
            .label(bar.method.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));
    }

    if let Some(reference) = spec.reference_line {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, reference), (n as f64, reference)],
            BLACK.mix(0.6).stroke_width(1),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(12)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;

    root.present()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_charts::{Bar, Label, TickRule, ValueFormat};

    fn spec(title: &str, body: ChartBody, y_scale: AxisScale) -> ChartSpec {
        ChartSpec {
            title: title.into(),
            x_label: "Size".into(),
            y_label: "Time (ms)".into(),
            x_scale: AxisScale::Log,
            y_scale,
            body,
            tick_rule: TickRule::default(),
            value_format: ValueFormat::new("ms"),
            reference_line: None,
            output_name: bench_charts::output_name(title),
        }
    }

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bench-charts-report-{}-{test}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_padded_ranges() {
        let linear = padded(2.0, 10.0, AxisScale::Linear);
        assert_eq!(linear.start, 0.0);
        assert!((linear.end - 11.5).abs() < 1e-9);
        assert_eq!(padded(0.0, 0.0, AxisScale::Linear), 0.0..1.0);
        let log = padded(3.0, 3.0, AxisScale::Log);
        assert!(log.start > 0.0 && log.start < 3.0 && log.end > 3.0);
    }

    #[test]
    fn test_y_fmt() {
        assert_eq!(y_fmt(1234.4), "1234");
        assert_eq!(y_fmt(12.34), "12.3");
        assert_eq!(y_fmt(0.01234), "0.012");
    }

    #[test]
    fn test_render_line_and_bar_charts() {
        let dir = scratch_dir("render");
        let mut renderer = SvgRenderer::new(&dir);

        let lines = spec(
            "Histogram: Random data",
            ChartBody::Lines(vec![
                LinePlot {
                    label: Label::from("Naive"),
                    points: vec![(4096.0, 0.2), (1_048_576.0, 40.0), (16_777_216.0, 700.0)],
                },
                LinePlot {
                    label: Label::from("SIMD"),
                    points: vec![(4096.0, 0.05), (1_048_576.0, 10.0), (16_777_216.0, 180.0)],
                },
            ]),
            AxisScale::Log,
        );
        let mut bars = spec(
            "Speedup (16 M)",
            ChartBody::Bars(vec![BarGroup {
                category: Label::from("Random data"),
                bars: vec![
                    Bar {
                        method: Label::from("SIMD"),
                        value: 3.9,
                        missing: false,
                        annotation: "3.9x".into(),
                    },
                    Bar {
                        method: Label::from("AVX"),
                        value: 0.0,
                        missing: true,
                        annotation: "0.0x".into(),
                    },
                ],
            }]),
            AxisScale::Linear,
        );
        bars.reference_line = Some(1.0);

        renderer.render(&lines).unwrap();
        renderer.render(&bars).unwrap();

        assert_eq!(
            renderer.saved(),
            &[
                dir.join("histogram_random_data.svg"),
                dir.join("speedup_16_m.svg")
            ]
        );
        for path in renderer.saved() {
            let svg = std::fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"), "{}", path.display());
        }
        assert_eq!(
            renderer.artifact_names(),
            vec!["histogram_random_data", "speedup_16_m"]
        );
        let svg = std::fs::read_to_string(dir.join("speedup_16_m.svg")).unwrap();
        assert!(svg.contains("3.9x"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_nothing_drawable_writes_nothing() {
        let dir = scratch_dir("empty");
        let mut renderer = SvgRenderer::new(&dir);
        let empty = spec(
            "Zeros",
            ChartBody::Lines(vec![LinePlot {
                label: Label::from("Naive"),
                points: vec![(0.0, 0.0)],
            }]),
            AxisScale::Log,
        );
        renderer.render(&empty).unwrap();
        assert!(renderer.saved().is_empty());
        assert!(renderer.artifact_names().is_empty());
        assert!(!dir.join("zeros.svg").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
