//! `buildlinks start` command.

use crate::config::Config;
use crate::engine::BuildEngine;
use crate::lifecycle::StreamListener;

/// Execute the `start` command and print the new build number.
///
/// # Errors
///
/// Returns an error string if the job name is invalid or the build cannot be recorded.
pub fn run(engine: &BuildEngine<'_>, config: &Config, job: &str) -> Result<(), String> {
    let job = config.job(job).map_err(|e| e.to_string())?;
    let mut console = StreamListener::new(std::io::stderr());
    let build = engine.start(&job, &mut console).map_err(|e| e.to_string())?;
    println!("{}", build.number);
    Ok(())
}
