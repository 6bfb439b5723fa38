use crate::domain::prerelease::PreRelease;
use crate::error::{ResolverError, Result};
use std::fmt;

/// Length of the commit identifier carried as build metadata
pub const BUILD_METADATA_LEN: usize = 8;

/// Semantic version representation
///
/// Renders as `MAJOR.MINOR.PATCH[-LABEL.SEQUENCE][+METADATA]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<PreRelease>,
    pub build_metadata: Option<BuildMetadata>,
}

impl Version {
    /// Create a release version with no prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Parse the numeric `MAJOR.MINOR.PATCH` prefix of a version string.
    ///
    /// A leading `v`/`V` is accepted. Everything after the first `-` or `+`
    /// is discarded, so `"1.4.2-dev.3+abcdef12"` parses as `1.4.2`.
    ///
    /// # Examples
    /// ```
    /// # use version_resolver::domain::Version;
    /// assert_eq!(Version::parse("v1.2.3").unwrap(), Version::new(1, 2, 3));
    /// assert_eq!(Version::parse("1.2.3-rc.1+deadbeef").unwrap(), Version::new(1, 2, 3));
    /// assert!(Version::parse("1.2").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let numeric = clean
            .split(|c| c == '-' || c == '+')
            .next()
            .unwrap_or_default();

        let parts: Vec<&str> = numeric.split('.').collect();
        if parts.len() != 3 {
            return Err(ResolverError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let major = parse_component(parts[0], "major", input)?;
        let minor = parse_component(parts[1], "minor", input)?;
        let patch = parse_component(parts[2], "patch", input)?;

        Ok(Version::new(major, minor, patch))
    }

    /// Bump version according to bump type.
    ///
    /// The result is a bare `MAJOR.MINOR.PATCH`; prerelease and metadata are dropped.
    /// Fails when the bumped component would exceed `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || {
            ResolverError::parse(format!(
                "Cannot apply {} bump to {}.{}.{}: component overflow",
                bump_type, self.major, self.minor, self.patch
            ))
        };
        Ok(match bump_type {
            VersionBump::Major => {
                Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionBump::Minor => {
                Version::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            VersionBump::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        })
    }

    pub fn with_prerelease(mut self, prerelease: PreRelease) -> Self {
        self.prerelease = Some(prerelease);
        self
    }

    pub fn with_build_metadata(mut self, metadata: BuildMetadata) -> Self {
        self.build_metadata = Some(metadata);
        self
    }

    /// The `(major, minor, patch)` triple
    pub fn core(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Convert into a `semver::Version`, validating the rendered identifiers.
    ///
    /// Fails when a custom prerelease label contains characters semver does not allow.
    pub fn to_semver(&self) -> Result<semver::Version> {
        let rendered = self.to_string();
        semver::Version::parse(&rendered).map_err(|e| {
            ResolverError::parse(format!("'{}' is not a valid semantic version: {}", rendered, e))
        })
    }
}

fn parse_component(part: &str, name: &str, input: &str) -> Result<u64> {
    part.parse::<u64>().map_err(|_| {
        ResolverError::parse(format!(
            "Invalid {} version '{}' in '{}'",
            name, part, input
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        if let Some(metadata) = &self.build_metadata {
            write!(f, "+{}", metadata)?;
        }
        Ok(())
    }
}

/// Build metadata: an 8-character commit identifier prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMetadata(String);

impl BuildMetadata {
    /// Build metadata from an identifier of exactly eight `[0-9A-Za-z-]` characters
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.chars().count() != BUILD_METADATA_LEN {
            return Err(ResolverError::config(format!(
                "Commit identifier '{}' must be exactly {} characters",
                id, BUILD_METADATA_LEN
            )));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ResolverError::config(format!(
                "Commit identifier '{}' contains characters not allowed in build metadata",
                id
            )));
        }
        Ok(BuildMetadata(id))
    }

    /// Take the first eight characters of a full commit SHA
    pub fn from_commit_id(sha: &str) -> Result<Self> {
        let prefix: String = sha.trim().chars().take(BUILD_METADATA_LEN).collect();
        Self::new(prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Parse `major`, `minor` or `patch` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Some(VersionBump::Major),
            "minor" => Some(VersionBump::Minor),
            "patch" => Some(VersionBump::Patch),
            _ => None,
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v.core(), (1, 2, 3));
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_discards_suffixes() {
        assert_eq!(
            Version::parse("1.4.2-dev.17+a1b2c3d4").unwrap(),
            Version::new(1, 4, 2)
        );
        assert_eq!(
            Version::parse("2.0.0+deadbeef").unwrap(),
            Version::new(2, 0, 0)
        );
        assert_eq!(
            Version::parse("3.1.0-SNAPSHOT").unwrap(),
            Version::new(3, 1, 0)
        );
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("1.x.3").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("-1.2.3").is_err());
    }

    #[test]
    fn test_version_parse_error_is_parse_variant() {
        let err = Version::parse("not-a-version").unwrap_err();
        assert!(matches!(err, ResolverError::Parse(_)));
    }

    #[test]
    fn test_version_bump_major() {
        let bumped = Version::new(1, 2, 3).bump(VersionBump::Major).unwrap();
        assert_eq!(bumped, Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        let bumped = Version::new(1, 2, 3).bump(VersionBump::Minor).unwrap();
        assert_eq!(bumped, Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        let bumped = Version::new(1, 2, 3).bump(VersionBump::Patch).unwrap();
        assert_eq!(bumped, Version::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_overflow() {
        let max = Version::new(u64::MAX, u64::MAX, u64::MAX);
        for bump in [VersionBump::Major, VersionBump::Minor, VersionBump::Patch] {
            assert!(matches!(max.bump(bump), Err(ResolverError::Parse(_))));
        }
        assert_eq!(
            Version::new(u64::MAX, 0, 7).bump(VersionBump::Minor).unwrap(),
            Version::new(u64::MAX, 1, 0)
        );
    }

    #[test]
    fn test_version_display_full() {
        let v = Version::new(1, 4, 3)
            .with_prerelease(PreRelease::new("dev", 17))
            .with_build_metadata(BuildMetadata::new("a1b2c3d4").unwrap());
        assert_eq!(v.to_string(), "1.4.3-dev.17+a1b2c3d4");
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_render_then_parse_keeps_core() {
        let v = Version::new(10, 0, 7)
            .with_prerelease(PreRelease::new("rc", 2))
            .with_build_metadata(BuildMetadata::new("0123abcd").unwrap());
        assert_eq!(Version::parse(&v.to_string()).unwrap().core(), v.core());
    }

    #[test]
    fn test_to_semver() {
        let v = Version::new(2, 1, 0).with_build_metadata(BuildMetadata::new("deadbeef").unwrap());
        let sv = v.to_semver().unwrap();
        assert_eq!(sv.minor, 1);
        assert_eq!(sv.build.as_str(), "deadbeef");

        let bad = Version::new(1, 0, 0).with_prerelease(PreRelease::new("has space", 1));
        assert!(bad.to_semver().is_err());
    }

    #[test]
    fn test_build_metadata_length() {
        assert!(BuildMetadata::new("abc").is_err());
        assert!(BuildMetadata::new("abcdef123").is_err());
        assert!(BuildMetadata::new("abc+def1").is_err());
        assert_eq!(
            BuildMetadata::from_commit_id("a1b2c3d4e5f60718293a4b5c6d7e8f9012345678")
                .unwrap()
                .as_str(),
            "a1b2c3d4"
        );
        assert!(BuildMetadata::from_commit_id("a1b2").is_err());
    }

    #[test]
    fn test_version_bump_parse() {
        assert_eq!(VersionBump::parse("MAJOR"), Some(VersionBump::Major));
        assert_eq!(VersionBump::parse("minor"), Some(VersionBump::Minor));
        assert_eq!(VersionBump::parse(" patch "), Some(VersionBump::Patch));
        assert_eq!(VersionBump::parse("none"), None);
    }

    #[test]
    fn test_version_bump_ordering() {
        assert!(VersionBump::Major > VersionBump::Minor);
        assert!(VersionBump::Minor > VersionBump::Patch);
    }
}
