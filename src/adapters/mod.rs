//! Adapter implementations for port traits.
//!
//! - `live`: real clock and disk.
//! - `recording`: wraps a live adapter and journals every call.

pub mod live;
pub mod recording;
