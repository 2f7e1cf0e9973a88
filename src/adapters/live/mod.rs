//! Live adapters backed by the real clock and disk.

pub mod clock;
pub mod filesystem;
pub mod link_fs;
