use crate::config::ConventionalCommitsConfig;
use crate::domain::{ParsedCommit, VersionBump};
use crate::error::Result;
use crate::git::Repository;
use tracing::debug;

/// Outcome of analyzing the history since the latest tag
#[derive(Debug, Clone, PartialEq)]
pub struct CommitAnalysis {
    pub latest_tag: Option<String>,
    pub commit_count: usize,
    /// `None` when no commit qualified for a bump
    pub suggestion: Option<VersionBump>,
}

/// Suggests a version bump from conventional commit messages
pub struct CommitAnalyzer {
    config: ConventionalCommitsConfig,
}

impl CommitAnalyzer {
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        CommitAnalyzer { config }
    }

    /// Analyze commits reachable from HEAD since the latest tag
    pub fn analyze_repository<R: Repository>(&self, repo: &R) -> Result<CommitAnalysis> {
        let latest_tag = repo.latest_tag()?;
        let commits = repo.commits_since(latest_tag.as_deref())?;
        let messages: Vec<String> = commits.into_iter().map(|c| c.message).collect();
        let suggestion = self.analyze_messages(&messages);

        debug!(
            latest_tag = ?latest_tag,
            commits = messages.len(),
            suggestion = ?suggestion,
            "analyzed commit history"
        );

        Ok(CommitAnalysis {
            latest_tag,
            commit_count: messages.len(),
            suggestion,
        })
    }

    /// Highest bump suggested by any message, or `None` if nothing qualifies
    pub fn analyze_messages(&self, messages: &[String]) -> Option<VersionBump> {
        messages
            .iter()
            .filter_map(|message| self.classify(message))
            .max()
    }

    /// Bump suggested by a single commit message
    pub fn classify(&self, message: &str) -> Option<VersionBump> {
        let parsed = ParsedCommit::parse(message, &self.config.breaking_change_indicators)?;

        if parsed.is_breaking_change {
            return Some(VersionBump::Major);
        }

        if self.config.minor_types.contains(&parsed.r#type) {
            Some(VersionBump::Minor)
        } else if self.config.patch_types.contains(&parsed.r#type) {
            Some(VersionBump::Patch)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn analyzer() -> CommitAnalyzer {
        CommitAnalyzer::new(ConventionalCommitsConfig::default())
    }

    fn messages(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_analyze_major() {
        let msgs = messages(&["feat: new feature", "fix(api)!: breaking change"]);
        assert_eq!(analyzer().analyze_messages(&msgs), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_minor() {
        let msgs = messages(&["feat: new feature", "fix: bug fix"]);
        assert_eq!(analyzer().analyze_messages(&msgs), Some(VersionBump::Minor));
    }

    #[test]
    fn test_analyze_patch() {
        let msgs = messages(&["fix: bug fix", "refactor: code cleanup"]);
        assert_eq!(analyzer().analyze_messages(&msgs), Some(VersionBump::Patch));
    }

    #[test]
    fn test_patch_types_table() {
        for kind in [
            "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore",
        ] {
            let msg = format!("{}: something", kind);
            assert_eq!(
                analyzer().classify(&msg),
                Some(VersionBump::Patch),
                "type '{}' should suggest patch",
                kind
            );
        }
    }

    #[test]
    fn test_breaking_change_via_footer() {
        let msgs =
            messages(&["fix: rename API field\n\nBREAKING CHANGE: field changed from X to Y"]);
        assert_eq!(analyzer().analyze_messages(&msgs), Some(VersionBump::Major));
    }

    #[test]
    fn test_breaking_change_order_independent() {
        let msgs = messages(&["feat(core)!: rewrite", "feat: a", "fix: b"]);
        assert_eq!(analyzer().analyze_messages(&msgs), Some(VersionBump::Major));
    }

    #[test]
    fn test_analyze_non_conventional_commits() {
        let msgs = messages(&["Updated stuff", "Fixed things", "Merge branch 'x'"]);
        assert_eq!(analyzer().analyze_messages(&msgs), None);
    }

    #[test]
    fn test_unknown_type_does_not_qualify() {
        let msgs = messages(&["wip: half done", "revert: oops"]);
        assert_eq!(analyzer().analyze_messages(&msgs), None);
    }

    #[test]
    fn test_analyze_empty() {
        assert_eq!(analyzer().analyze_messages(&[]), None);
        assert_eq!(analyzer().analyze_messages(&messages(&[""])), None);
    }

    #[test]
    fn test_custom_type_table() {
        let config = ConventionalCommitsConfig {
            minor_types: vec!["feat".to_string(), "feature".to_string()],
            patch_types: vec!["fix".to_string()],
            ..ConventionalCommitsConfig::default()
        };
        let analyzer = CommitAnalyzer::new(config);
        assert_eq!(analyzer.classify("feature: x"), Some(VersionBump::Minor));
        assert_eq!(analyzer.classify("docs: x"), None);
    }

    #[test]
    fn test_analyze_repository_since_latest_tag() {
        let mut repo = MockRepository::new();
        repo.add_commit("a1", "feat: old feature");
        repo.add_tag("v1.0.0");
        repo.add_commit("b2", "fix: bug");
        repo.add_commit("c3", "docs: readme");

        let analysis = analyzer().analyze_repository(&repo).unwrap();
        assert_eq!(analysis.latest_tag.as_deref(), Some("v1.0.0"));
        assert_eq!(analysis.commit_count, 2);
        assert_eq!(analysis.suggestion, Some(VersionBump::Patch));
    }

    #[test]
    fn test_analyze_repository_without_tags() {
        let mut repo = MockRepository::new();
        repo.add_commit("a1", "feat: first");

        let analysis = analyzer().analyze_repository(&repo).unwrap();
        assert_eq!(analysis.latest_tag, None);
        assert_eq!(analysis.suggestion, Some(VersionBump::Minor));
    }
}
