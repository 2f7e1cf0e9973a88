//! `buildlinks complete` command.

use crate::config::Config;
use crate::engine::BuildEngine;
use crate::lifecycle::StreamListener;
use crate::model::{BuildNumber, BuildResult};

/// Execute the `complete` command.
///
/// # Errors
///
/// Returns an error string if the build is unknown or already completed.
pub fn run(
    engine: &BuildEngine<'_>,
    config: &Config,
    job: &str,
    number: u32,
    result: BuildResult,
) -> Result<(), String> {
    let job = config.job(job).map_err(|e| e.to_string())?;
    let mut console = StreamListener::new(std::io::stderr());
    let build = engine
        .complete(&job, BuildNumber(number), result, &mut console)
        .map_err(|e| e.to_string())?;
    println!("#{} {result}", build.number);
    Ok(())
}
