use crate::domain::channel::Channel;

/// How a rule recognises a branch name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchMatcher {
    /// Branch name equals one of the names
    Exact(&'static [&'static str]),
    /// Branch name starts with one of the prefixes
    Prefix(&'static [&'static str]),
    /// Matches every branch
    Any,
}

impl BranchMatcher {
    pub fn matches(&self, branch: &str) -> bool {
        match self {
            BranchMatcher::Exact(names) => names.contains(&branch),
            BranchMatcher::Prefix(prefixes) => prefixes.iter().any(|p| branch.starts_with(p)),
            BranchMatcher::Any => true,
        }
    }
}

/// One entry of the branch classification table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRule {
    pub matcher: BranchMatcher,
    pub channel: Channel,
}

/// Branch classification, evaluated top to bottom; first match wins.
pub const BRANCH_RULES: &[BranchRule] = &[
    BranchRule {
        matcher: BranchMatcher::Exact(&["main", "master"]),
        channel: Channel::Release,
    },
    BranchRule {
        matcher: BranchMatcher::Exact(&["develop"]),
        channel: Channel::Dev,
    },
    BranchRule {
        matcher: BranchMatcher::Prefix(&["release/"]),
        channel: Channel::ReleaseCandidate,
    },
    BranchRule {
        matcher: BranchMatcher::Prefix(&["feature/"]),
        channel: Channel::Alpha,
    },
    BranchRule {
        matcher: BranchMatcher::Prefix(&["bugfix/", "hotfix/"]),
        channel: Channel::Beta,
    },
    BranchRule {
        matcher: BranchMatcher::Any,
        channel: Channel::Alpha,
    },
];

/// Branches on which a version tag may be created
pub const TAG_BRANCHES: &[BranchMatcher] = &[
    BranchMatcher::Exact(&["main", "master", "develop"]),
    BranchMatcher::Prefix(&["release/"]),
];

/// Find the first rule in `rules` matching `branch`
pub fn classify<'a>(rules: &'a [BranchRule], branch: &str) -> Option<&'a BranchRule> {
    rules.iter().find(|rule| rule.matcher.matches(branch))
}

/// Represents a git branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_main: bool,
}

impl BranchContext {
    /// Create a new branch context; a `refs/heads/` prefix is stripped
    pub fn new(name: impl Into<String>) -> Self {
        let raw = name.into();
        let name_str = raw
            .strip_prefix("refs/heads/")
            .map(str::to_string)
            .unwrap_or(raw);
        let is_main = matches!(name_str.as_str(), "main" | "master");

        BranchContext {
            name: name_str,
            is_main,
        }
    }

    /// Channel from the built-in rule table
    pub fn channel(&self) -> Channel {
        classify(BRANCH_RULES, &self.name)
            .map(|rule| rule.channel.clone())
            .unwrap_or(Channel::Alpha)
    }

    /// Whether a version tag may be created on this branch
    pub fn allows_tagging(&self) -> bool {
        TAG_BRANCHES.iter().any(|m| m.matches(&self.name))
    }
}
