//! Clock port for build timestamps.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Build records carry start and completion times; tests substitute a fixed
/// clock so records are reproducible.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
