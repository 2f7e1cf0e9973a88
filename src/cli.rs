//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::BuildResult;

/// Top-level CLI parser for `buildlinks`.
#[derive(Debug, Parser)]
#[command(name = "buildlinks", version, about = "Keep build permalink symlinks in sync")]
pub struct Cli {
    /// Write a journal of every symlink call to this file.
    #[arg(long, global = true, value_name = "FILE")]
    pub journal: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the next build of a job and write its legacy links.
    Start {
        /// Job full name, e.g. `folder/project`.
        job: String,
    },
    /// Record the final result of a running build and refresh permalinks.
    Complete {
        /// Job full name.
        job: String,
        /// Build number.
        number: u32,
        /// Final result: success, unstable, failure, not-built or aborted.
        #[arg(long, default_value = "success")]
        result: BuildResult,
    },
    /// Delete a build and refresh permalinks.
    Delete {
        /// Job full name.
        job: String,
        /// Build number.
        number: u32,
    },
    /// Repair permalink links without a lifecycle event.
    Refresh {
        /// Job full name.
        job: String,
    },
    /// Show resolved and on-disk permalinks for a job.
    Status {
        /// Job full name.
        job: String,
    },
}

impl Command {
    /// Short name used for the journal header.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Complete { .. } => "complete",
            Self::Delete { .. } => "delete",
            Self::Refresh { .. } => "refresh",
            Self::Status { .. } => "status",
        }
    }
}
