//! Prerelease identifiers for pipeline builds
//!
//! A prerelease always pairs a label with the run sequence that produced it,
//! e.g. `dev.17` or `rc.3`. See https://semver.org/#spec-item-9

use std::fmt;

/// Prerelease label plus run sequence
///
/// The two are always present together, so a version either carries both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    /// Channel label (`dev`, `alpha`, `beta`, `rc`, or a custom token)
    pub label: String,
    /// Pipeline run counter, unique to the execution
    pub sequence: u64,
}

impl PreRelease {
    pub fn new(label: impl Into<String>, sequence: u64) -> Self {
        PreRelease {
            label: label.into(),
            sequence,
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.label, self.sequence)
    }
}
