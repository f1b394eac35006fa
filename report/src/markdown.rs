//! Markdown summary of a report run.
//!
//! Produces `report.md` next to the SVG files: every chart embedded in
//! request order, a value table under each bar chart, then the records that
//! were skipped and the diagnostics raised while building the charts.

use std::fmt::Write;
use std::path::Path;

use bench_charts::{BarGroup, ChartBody, ReportOutput, ReportPlan};

// ---------------------------------------------------------------------------
// Report sections
// ---------------------------------------------------------------------------

fn write_header(out: &mut String, plan: &ReportPlan, records: usize) -> std::fmt::Result {
    writeln!(out, "# Benchmark Report\n")?;
    writeln!(
        out,
        "Grammar `{}` version {}, {} benchmark records.\n",
        plan.grammar.name, plan.grammar.version, records
    )
}

fn write_bar_table(out: &mut String, groups: &[BarGroup]) -> std::fmt::Result {
    let Some(first) = groups.first() else {
        return Ok(());
    };
    write!(out, "| |")?;
    for bar in &first.bars {
        write!(out, " {} |", bar.method)?;
    }
    writeln!(out)?;
    write!(out, "|---|")?;
    for _ in &first.bars {
        write!(out, "---:|")?;
    }
    writeln!(out)?;
    for group in groups {
        write!(out, "| **{}** |", group.category)?;
        for bar in &group.bars {
            if bar.missing {
                write!(out, " n/a |")?;
            } else {
                write!(out, " {} |", bar.annotation)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_charts(out: &mut String, output: &ReportOutput, written: &[String]) -> std::fmt::Result {
    writeln!(out, "## Charts\n")?;
    if output.charts.is_empty() {
        return writeln!(out, "No chart had data.\n");
    }
    for chart in &output.charts {
        writeln!(out, "### {}\n", chart.title)?;
        if written.contains(&chart.output_name) {
            writeln!(out, "![{}]({}.svg)\n", chart.title, chart.output_name)?;
        } else {
            writeln!(out, "Nothing drawable, no image written.\n")?;
        }
        if let ChartBody::Bars(groups) = &chart.body {
            write_bar_table(out, groups)?;
        }
    }
    Ok(())
}

fn write_problems(out: &mut String, output: &ReportOutput) -> std::fmt::Result {
    if !output.skipped.is_empty() {
        writeln!(out, "## Skipped Records\n")?;
        writeln!(out, "| Benchmark | Reason |")?;
        writeln!(out, "|-----------|--------|")?;
        for skipped in &output.skipped {
            writeln!(out, "| `{}` | {} |", skipped.name, skipped.error)?;
        }
        writeln!(out)?;
    }
    if !output.diagnostics.is_empty() {
        writeln!(out, "## Diagnostics\n")?;
        for diagnostic in &output.diagnostics {
            writeln!(out, "- {diagnostic}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Markdown text of the whole report. Only charts named in `written` are
/// embedded as images.
pub fn render(
    plan: &ReportPlan,
    output: &ReportOutput,
    written: &[String],
    records: usize,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_header(&mut out, plan, records)?;
    write_charts(&mut out, output, written)?;
    write_problems(&mut out, output)?;
    Ok(out)
}

/// Writes `report.md` into `output_dir`.
pub fn generate_report(
    plan: &ReportPlan,
    output: &ReportOutput,
    written: &[String],
    records: usize,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("report.md");
    std::fs::write(&path, render(plan, output, written, records)?)?;
    tracing::info!("Saved: {}", path.display());
    Ok(())
}
