//! `buildlinks refresh` command.

use crate::config::Config;
use crate::engine::BuildEngine;
use crate::lifecycle::StreamListener;
use crate::sync::RefreshReport;

/// Execute the `refresh` command and summarize what changed.
///
/// # Errors
///
/// Returns an error string if the job name is invalid. Link failures are
/// reported in the summary, not as an error.
pub fn run(engine: &BuildEngine<'_>, config: &Config, job: &str) -> Result<(), String> {
    let job = config.job(job).map_err(|e| e.to_string())?;
    let mut console = StreamListener::new(std::io::stderr());
    let report = engine.refresh(&job, &mut console);
    println!("{}", format_report(&report));
    Ok(())
}

/// Formats a refresh report as a human-readable summary.
#[must_use]
pub fn format_report(report: &RefreshReport) -> String {
    if report.skipped {
        return "No builds directory; nothing to refresh.".to_string();
    }
    let mut lines = Vec::new();
    for id in &report.relinked {
        lines.push(format!("  [RELINKED]   {id}"));
    }
    for id in &report.failed {
        lines.push(format!("  [FAILED]     {id}"));
    }
    lines.push(format!(
        "{} relinked, {} up to date, {} failed.",
        report.relinked.len(),
        report.up_to_date.len(),
        report.failed.len()
    ));
    lines.join("\n")
}
