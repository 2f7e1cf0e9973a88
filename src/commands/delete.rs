//! `buildlinks delete` command.

use crate::config::Config;
use crate::engine::BuildEngine;
use crate::model::BuildNumber;

/// Execute the `delete` command.
///
/// # Errors
///
/// Returns an error string if the build is unknown or cannot be removed.
pub fn run(engine: &BuildEngine<'_>, config: &Config, job: &str, number: u32) -> Result<(), String> {
    let job = config.job(job).map_err(|e| e.to_string())?;
    let build = engine.delete(&job, BuildNumber(number)).map_err(|e| e.to_string())?;
    println!("Deleted #{}", build.number);
    Ok(())
}
