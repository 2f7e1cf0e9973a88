//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the synchronizer and something it does not
//! own: the clock, plain file storage for build records, the symlink
//! primitive, and the permalink resolver. Implementations live in
//! `src/adapters/` and `src/resolver/`.

pub mod clock;
pub mod filesystem;
pub mod link_fs;
pub mod resolver;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use link_fs::{LinkFs, Removal};
pub use resolver::PermalinkResolver;
