use regex::Regex;
use std::sync::OnceLock;

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message as a conventional commit header
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text (returned as `None`)
    ///
    /// `breaking_indicators` are footer tokens such as `BREAKING CHANGE:`.
    pub fn parse(message: &str, breaking_indicators: &[String]) -> Option<Self> {
        let header = message.lines().next().unwrap_or_default().trim();
        let captures = header_regex().captures(header)?;

        let r#type = captures.get(1)?.as_str().to_lowercase();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty());
        let has_exclamation = captures.get(3).is_some();
        let description = captures
            .get(4)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let has_footer = breaking_indicators
            .iter()
            .any(|indicator| message.contains(indicator.as_str()));

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            is_breaking_change: has_exclamation || has_footer,
        })
    }
}

fn header_regex() -> &'static Regex {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADER_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+)(?:\(([^)]*)\))?(!)?:\s*(.*)$")
            .expect("Invalid conventional commit header regex")
    })
}
