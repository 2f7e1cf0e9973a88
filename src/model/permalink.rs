//! Permalink identities and the legacy naming layer.

use std::fmt;

/// On-disk link content meaning "no build satisfies this permalink".
pub const NO_TARGET: &str = "-1";

/// Legacy link names in the job root and the permalink id each one mirrors.
pub const LEGACY_LINKS: [(&str, &str); 2] = [
    ("lastSuccessful", Permalink::LAST_SUCCESSFUL),
    ("lastStable", Permalink::LAST_STABLE),
];

/// A logical, stable name for "the build matching some rule".
///
/// Only the id is owned here; the rule is evaluated by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permalink {
    id: String,
}

impl Permalink {
    /// Last build whose result is success.
    pub const LAST_STABLE: &'static str = "lastStableBuild";
    /// Last build whose result is success or unstable.
    pub const LAST_SUCCESSFUL: &'static str = "lastSuccessfulBuild";
    /// Last build whose result is failure.
    pub const LAST_FAILED: &'static str = "lastFailedBuild";
    /// Last build whose result is unstable.
    pub const LAST_UNSTABLE: &'static str = "lastUnstableBuild";
    /// Last completed build whose result is worse than success.
    pub const LAST_UNSUCCESSFUL: &'static str = "lastUnsuccessfulBuild";
    /// Last build with any result.
    pub const LAST_COMPLETED: &'static str = "lastCompletedBuild";

    /// Creates a permalink with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The id, which is also the link name in the builds directory.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
