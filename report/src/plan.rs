//! Resolution of the plan argument: a built-in preset name or a JSON plan file.

use std::path::Path;

use bench_charts::ReportPlan;
use bench_charts::plan::presets;

/// Returns the preset called `arg`, or else the plan stored in the file `arg`.
///
/// File plans are validated before they are returned.
pub fn resolve(arg: &str) -> Result<ReportPlan, Box<dyn std::error::Error>> {
    if let Some(plan) = presets::by_name(arg) {
        return Ok(plan);
    }
    let path = Path::new(arg);
    if !path.is_file() {
        return Err(format!(
            "unknown plan '{arg}': expected one of {} or a JSON plan file",
            presets::NAMES.join(", ")
        )
        .into());
    }
    let text = std::fs::read_to_string(path)?;
    let plan: ReportPlan = serde_json::from_str(&text)?;
    plan.validate()?;
    Ok(plan)
}
