use crate::analyzer::CommitAnalysis;
use crate::plan::{ReleasePlan, TagSkip};
use crate::resolver::{BumpSource, VersionDecision};
use std::fmt;

/// Non-fatal conditions around a resolution that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No reachable tag, so the whole history was analyzed
    NoPreviousTag { commit_count: usize },
    /// Strategy was `auto` and no commit qualified, so patch was bumped anyway
    NoQualifyingCommits {
        latest_tag: Option<String>,
        commit_count: usize,
    },
    /// Custom label used as a category outside the fixed channel set
    CustomCategory { category: String },
    /// Version changed but the branch is not allowed to carry tags
    TagBranchNotAllowed { branch: String, tag: String },
    /// Rendered version is not valid semver (custom label characters)
    InvalidSemver { version: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPreviousTag { commit_count } => {
                write!(
                    f,
                    "No previous tag found; analyzed all {} commit(s)",
                    commit_count
                )
            }
            BoundaryWarning::NoQualifyingCommits {
                latest_tag,
                commit_count,
            } => {
                let since = latest_tag.as_deref().unwrap_or("the first commit");
                write!(
                    f,
                    "No qualifying commits in {} commit(s) since {}; bumping patch",
                    commit_count, since
                )
            }
            BoundaryWarning::CustomCategory { category } => {
                write!(
                    f,
                    "Custom category '{}' is outside the known channels and routes to the release tier",
                    category
                )
            }
            BoundaryWarning::TagBranchNotAllowed { branch, tag } => {
                write!(
                    f,
                    "Branch '{}' is not allowed to be tagged; skipping tag '{}'",
                    branch, tag
                )
            }
            BoundaryWarning::InvalidSemver { version, reason } => {
                write!(f, "Version '{}' is not valid semver: {}", version, reason)
            }
        }
    }
}

const KNOWN_CATEGORIES: &[&str] = &["release", "dev", "alpha", "beta", "rc"];

/// Collect the warnings that apply to a resolved decision
pub fn collect_warnings(
    decision: &VersionDecision,
    plan: &ReleasePlan,
    branch: &str,
    analysis: Option<&CommitAnalysis>,
) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if let Some(analysis) = analysis.filter(|a| a.latest_tag.is_none()) {
        warnings.push(BoundaryWarning::NoPreviousTag {
            commit_count: analysis.commit_count,
        });
    }

    if decision.bump_source == BumpSource::Fallback {
        if let Some(analysis) = analysis {
            warnings.push(BoundaryWarning::NoQualifyingCommits {
                latest_tag: analysis.latest_tag.clone(),
                commit_count: analysis.commit_count,
            });
        }
    }

    if !KNOWN_CATEGORIES.contains(&decision.version_category.as_str()) {
        warnings.push(BoundaryWarning::CustomCategory {
            category: decision.version_category.clone(),
        });
    }

    if plan.tag_skipped == Some(TagSkip::BranchNotAllowed) {
        warnings.push(BoundaryWarning::TagBranchNotAllowed {
            branch: branch.to_string(),
            tag: plan.tag_name.clone(),
        });
    }

    if let Err(e) = decision.version.to_semver() {
        warnings.push(BoundaryWarning::InvalidSemver {
            version: decision.new_version.clone(),
            reason: e.to_string(),
        });
    }

    warnings
}
