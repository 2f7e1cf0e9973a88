//! Keeps build permalink symlinks consistent with build lifecycle events.
//!
//! A job's builds directory holds one symlink per permalink
//! (`lastStableBuild -> 12`, `lastFailedBuild -> -1`, ...) and the job root
//! holds legacy aliases (`lastStable -> builds/lastStableBuild`). The
//! [`sync::LegacyLinkSynchronizer`] writes the aliases when a build starts
//! and repairs the permalink links whenever a build completes or is deleted.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod journal;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod ports;
pub mod resolver;
pub mod store;
pub mod sync;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration loading, or
/// command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let config = config::Config::load().map_err(|err| err.to_string())?;
    observability::init_logging(config.log_format);
    commands::dispatch(&cli, &config)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["buildlinks", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_rejects_invalid_job_name() {
        let result = run(["buildlinks", "status", "../escape"]);
        assert!(result.unwrap_err().contains("invalid job name"));
    }
}
