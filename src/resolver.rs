//! Version resolution: the single pure step that turns pipeline inputs into a
//! [`VersionDecision`].

use crate::domain::{BranchContext, BuildMetadata, Channel, PreRelease, Version, VersionBump};
use crate::error::{ResolverError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Versioning strategy requested for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Follow the commit suggestion, else bump patch
    #[default]
    Auto,
    Major,
    Minor,
    Patch,
}

impl Strategy {
    /// Parse a strategy, treating anything unrecognised as `auto`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            debug!(strategy = s, "unknown strategy, falling back to auto");
            Strategy::Auto
        })
    }

    /// Parse honouring the `strict_strategy` switch
    pub fn parse_with(s: &str, strict: bool) -> Result<Self> {
        if strict {
            s.parse()
        } else {
            Ok(Self::parse_lenient(s))
        }
    }

    fn explicit_bump(self) -> Option<VersionBump> {
        match self {
            Strategy::Auto => None,
            Strategy::Major => Some(VersionBump::Major),
            Strategy::Minor => Some(VersionBump::Minor),
            Strategy::Patch => Some(VersionBump::Patch),
        }
    }
}

impl FromStr for Strategy {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(Strategy::Auto),
            "major" => Ok(Strategy::Major),
            "minor" => Ok(Strategy::Minor),
            "patch" => Ok(Strategy::Patch),
            other => Err(ResolverError::config(format!(
                "Unknown strategy '{}': expected auto, major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Auto => write!(f, "auto"),
            Strategy::Major => write!(f, "major"),
            Strategy::Minor => write!(f, "minor"),
            Strategy::Patch => write!(f, "patch"),
        }
    }
}

/// Everything the resolver needs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    /// Version recorded in the project manifest
    pub current_version: String,
    pub strategy: Strategy,
    /// Overrides branch-based channel inference when non-empty
    pub custom_prerelease: Option<String>,
    pub branch_name: String,
    /// Suggestion from commit analysis, honoured only with `Strategy::Auto`
    pub commit_suggested_bump: Option<VersionBump>,
    pub run_sequence: u64,
    /// Exactly eight characters
    pub commit_id_prefix: String,
}

/// How the base bump was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpSource {
    Commits,
    Strategy,
    /// `auto` with no commit signal
    Fallback,
}

/// Output of a resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionDecision {
    pub new_version: String,
    pub version_changed: bool,
    pub is_prerelease: bool,
    pub version_category: String,
    #[serde(skip)]
    pub version: Version,
    #[serde(skip)]
    pub channel: Channel,
    #[serde(skip)]
    pub bump: VersionBump,
    #[serde(skip)]
    pub bump_source: BumpSource,
}

/// Compute the next version and its channel.
///
/// Fails when `current_version` has no `MAJOR.MINOR.PATCH` prefix or cannot be
/// bumped, when the commit identifier is not a valid 8-character prefix, or when
/// the custom prerelease label contains control characters.
pub fn resolve(request: &ResolveRequest) -> Result<VersionDecision> {
    let current = Version::parse(&request.current_version)?;
    let metadata = BuildMetadata::new(request.commit_id_prefix.clone())?;
    if let Some(label) = &request.custom_prerelease {
        check_custom_label(label)?;
    }

    let (bump, bump_source) = select_bump(request.strategy, request.commit_suggested_bump);
    let channel = select_channel(request.custom_prerelease.as_deref(), &request.branch_name);

    let mut version = current.bump(bump)?;
    if let Some(label) = channel.label() {
        version = version.with_prerelease(PreRelease::new(label, request.run_sequence));
    }
    let version = version.with_build_metadata(metadata);

    let new_version = version.to_string();
    let version_changed = new_version != request.current_version.trim();

    debug!(
        current = %request.current_version,
        strategy = %request.strategy,
        bump = %bump,
        bump_source = ?bump_source,
        channel = %channel,
        new_version = %new_version,
        "resolved version"
    );

    Ok(VersionDecision {
        new_version,
        version_changed,
        is_prerelease: version.is_prerelease(),
        version_category: channel.category().to_string(),
        version,
        channel,
        bump,
        bump_source,
    })
}

/// Pick the base bump: explicit strategy, then commit suggestion, then patch
pub fn select_bump(
    strategy: Strategy,
    suggestion: Option<VersionBump>,
) -> (VersionBump, BumpSource) {
    match (strategy.explicit_bump(), suggestion) {
        (Some(bump), _) => (bump, BumpSource::Strategy),
        (None, Some(bump)) => (bump, BumpSource::Commits),
        (None, None) => (VersionBump::Patch, BumpSource::Fallback),
    }
}

/// The label ends up in `key=value` step outputs, one pair per line
fn check_custom_label(label: &str) -> Result<()> {
    match label.trim().chars().find(|c| c.is_control()) {
        Some(c) => Err(ResolverError::config(format!(
            "Custom prerelease label {:?} contains control character {:?}",
            label, c
        ))),
        None => Ok(()),
    }
}

/// Parse a commit-analysis suggestion; `none` or an empty value means no suggestion
pub fn parse_suggestion(raw: &str) -> Result<Option<VersionBump>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    VersionBump::parse(trimmed).map(Some).ok_or_else(|| {
        ResolverError::config(format!(
            "Invalid bump suggestion '{}': expected major, minor, patch or none",
            raw
        ))
    })
}

/// A non-blank custom label wins; otherwise the branch rule table decides
pub fn select_channel(custom_prerelease: Option<&str>, branch_name: &str) -> Channel {
    match custom_prerelease.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => Channel::Custom(label.to_string()),
        None => BranchContext::new(branch_name).channel(),
    }
}
