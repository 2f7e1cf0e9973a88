//! Command dispatch and handlers.

pub mod complete;
pub mod delete;
pub mod refresh;
pub mod start;
pub mod status;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::{JournalSession, ServiceContext};
use crate::engine::BuildEngine;

/// Dispatch a parsed command to its handler.
///
/// With `--journal <file>`, every symlink call is journaled and the file is
/// written after the command finishes, even if it failed.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli, config: &Config) -> Result<(), String> {
    let (ctx, session) = match &cli.journal {
        Some(path) => {
            let (ctx, session) = ServiceContext::journaling(path, cli.command.name());
            (ctx, Some(session))
        }
        None => (ServiceContext::live(), None),
    };

    let result = dispatch_with_context(&cli.command, config, &ctx);

    if let Some(session) = session {
        drop(ctx);
        finish_journal(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(
    command: &Command,
    config: &Config,
    ctx: &ServiceContext,
) -> Result<(), String> {
    let engine = BuildEngine::new(ctx);
    match command {
        Command::Start { job } => start::run(&engine, config, job),
        Command::Complete { job, number, result } => {
            complete::run(&engine, config, job, *number, *result)
        }
        Command::Delete { job, number } => delete::run(&engine, config, job, *number),
        Command::Refresh { job } => refresh::run(&engine, config, job),
        Command::Status { job } => status::run(&engine, ctx, config, job),
    }
}

/// Write the journal and print where it went.
fn finish_journal(session: JournalSession) -> Result<(), String> {
    let path = session.finish()?;
    eprintln!("Journal saved to: {}", path.display());
    Ok(())
}
