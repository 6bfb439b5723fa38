//! Release channels and the promotion tiers they route to

use serde::Serialize;
use std::fmt;

/// Release channel a resolved version belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// Stable release, no prerelease label
    Release,
    /// Integration builds from `develop`
    Dev,
    /// Feature and untracked branches
    Alpha,
    /// Bugfix and hotfix branches
    Beta,
    /// Release candidate
    ReleaseCandidate,
    /// Free-text label supplied by the caller; used verbatim as the category
    Custom(String),
}

impl Channel {
    /// Prerelease label, or `None` for the release channel
    pub fn label(&self) -> Option<&str> {
        match self {
            Channel::Release => None,
            other => Some(other.category()),
        }
    }

    /// Category tag used by downstream routing
    pub fn category(&self) -> &str {
        match self {
            Channel::Release => "release",
            Channel::Dev => "dev",
            Channel::Alpha => "alpha",
            Channel::Beta => "beta",
            Channel::ReleaseCandidate => "rc",
            Channel::Custom(label) => label,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !matches!(self, Channel::Release)
    }

    /// Whether the category falls outside the fixed channel set
    pub fn is_custom(&self) -> bool {
        matches!(self, Channel::Custom(_))
    }

    pub fn tier(&self) -> Tier {
        Tier::for_category(self.category())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// Promotion tier a category is published to
///
/// Artifact-store and container-registry selection both go through
/// [`Tier::for_category`] so a version is never promoted along two paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Testing,
    Staging,
    Release,
}

impl Tier {
    /// Map a version category onto its tier.
    ///
    /// `dev`/`alpha` go to testing, `rc`/`beta` to staging, and everything
    /// else, custom labels included, to release.
    pub fn for_category(category: &str) -> Self {
        match category {
            "dev" | "alpha" => Tier::Testing,
            "rc" | "beta" => Tier::Staging,
            _ => Tier::Release,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Testing => write!(f, "testing"),
            Tier::Staging => write!(f, "staging"),
            Tier::Release => write!(f, "release"),
        }
    }
}
