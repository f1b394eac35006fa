//! Benchmark report renderer.
//!
//! Reads a Google Benchmark JSON report, runs a report plan over it, and
//! writes one SVG per chart plus a Markdown summary. The plan is either a
//! built-in preset (`hashmap`, `histogram-simd`, `histogram-parallel`) or a
//! JSON file holding a serialized `ReportPlan`.
//!
//! Run: `cargo run -p bench-charts-report -- <report.json> <preset|plan.json> [output_dir]`
//!
//! Set `RUST_LOG=info` to see every saved file, `RUST_LOG=warn` for skipped
//! records and diagnostics only.

mod markdown;
mod plan;
mod plots;

use std::path::{Path, PathBuf};

use bench_charts::{BenchmarkReport, ChartRenderer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: bench-charts-report <report.json> <preset|plan.json> [output_dir]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
    let report_path = PathBuf::from(&args[1]);
    let output_dir = if args.len() > 3 {
        PathBuf::from(&args[3])
    } else {
        PathBuf::from("plots")
    };

    match run(&report_path, &args[2], &output_dir) {
        Ok(artifacts) => {
            for name in artifacts {
                println!("{name}");
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Loads, plans, renders. Returns the names of the written artifacts in
/// chart order.
fn run(
    report_path: &Path,
    plan_arg: &str,
    output_dir: &Path,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let plan = plan::resolve(plan_arg)?;
    let text = std::fs::read_to_string(report_path)
        .map_err(|e| format!("cannot read '{}': {e}", report_path.display()))?;
    let report = BenchmarkReport::from_json(&text)?;
    info!(
        "Read {} benchmarks from {}",
        report.benchmarks.len(),
        report_path.display()
    );

    let output = plan.run(&report.benchmarks)?;
    for skipped in &output.skipped {
        warn!("Skipped {}: {}", skipped.name, skipped.error);
    }
    for diagnostic in &output.diagnostics {
        warn!("{diagnostic}");
    }

    let mut renderer = plots::SvgRenderer::new(output_dir);
    for chart in &output.charts {
        renderer.render(chart)?;
    }
    let written = renderer.artifact_names();
    markdown::generate_report(
        &plan,
        &output,
        &written,
        report.benchmarks.len(),
        output_dir,
    )?;

    Ok(written)
}
