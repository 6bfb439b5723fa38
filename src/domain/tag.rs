use crate::error::{ResolverError, Result};

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern; it must contain exactly one `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches("{version}").count() != 1 {
            return Err(ResolverError::config(format!(
                "Tag pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3+deadbeef" -> "v1.2.3+deadbeef"
    pub fn format(&self, version: &str) -> String {
        self.pattern.replace("{version}", version)
    }

    /// Extract the version part from a tag produced by this pattern
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        let (prefix, suffix) = self.pattern.split_once("{version}")?;
        tag.strip_prefix(prefix)?.strip_suffix(suffix)
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.format("1.2.3-dev.4+a1b2c3d4"), "v1.2.3-dev.4+a1b2c3d4");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::new("release-{version}").unwrap();
        assert_eq!(pattern.format("1.2.3"), "release-1.2.3");
    }

    #[test]
    fn test_pattern_requires_single_placeholder() {
        assert!(TagPattern::new("v").is_err());
        assert!(TagPattern::new("{version}-{version}").is_err());
    }

    #[test]
    fn test_version_part() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.version_part("v1.2.3"), Some("1.2.3"));
        assert_eq!(pattern.version_part("release-1.2.3"), None);
    }
}
