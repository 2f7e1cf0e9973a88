//! `buildlinks status` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::engine::BuildEngine;
use crate::model::{Job, LEGACY_LINKS, NO_TARGET};
use crate::ports::PermalinkResolver;

/// Execute the `status` command.
///
/// Prints one row per permalink with the resolver's answer next to the
/// on-disk link value, then the legacy links.
///
/// # Errors
///
/// Returns an error string if the job name is invalid.
pub fn run(
    engine: &BuildEngine<'_>,
    ctx: &ServiceContext,
    config: &Config,
    job: &str,
) -> Result<(), String> {
    let job = config.job(job).map_err(|e| e.to_string())?;
    println!("{}", render(engine.resolver(), ctx, &job));
    Ok(())
}

/// Renders the status table for a job.
#[must_use]
pub fn render(resolver: &dyn PermalinkResolver, ctx: &ServiceContext, job: &Job) -> String {
    let mut rows: Vec<(String, String, String)> = Vec::new();
    for permalink in resolver.list_permalinks(job) {
        let resolved = resolver
            .resolve(&permalink, job)
            .map_or_else(|| NO_TARGET.to_string(), |b| b.number.to_string());
        let on_disk = read_or_dash(ctx, &job.permalink_path(permalink.id()));
        rows.push((permalink.id().to_string(), resolved, on_disk));
    }
    for (name, _) in LEGACY_LINKS {
        rows.push((name.to_string(), String::new(), read_or_dash(ctx, &job.legacy_path(name))));
    }

    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(4).max(4);
    let resolved_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(8).max(8);

    let mut lines = vec![
        format!("{:<name_width$}  {:<resolved_width$}  ON DISK", "LINK", "RESOLVED"),
        format!("{:-<name_width$}  {:-<resolved_width$}  -------", "", ""),
    ];
    for (name, resolved, on_disk) in &rows {
        lines.push(format!("{name:<name_width$}  {resolved:<resolved_width$}  {on_disk}"));
    }
    lines.join("\n")
}

fn read_or_dash(ctx: &ServiceContext, path: &std::path::Path) -> String {
    match ctx.links.read_link(path) {
        Ok(Some(target)) => target,
        Ok(None) => "-".to_string(),
        Err(e) => format!("? ({e})"),
    }
}
