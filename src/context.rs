//! Pipeline context: branch, run counter and commit of the current CI run

use crate::domain::BuildMetadata;
use crate::error::{ResolverError, Result};
use crate::git::Repository;
use std::env;

/// Environment variables consulted, in order of preference
pub const BRANCH_VARS: &[&str] = &["GITHUB_HEAD_REF", "GITHUB_REF_NAME"];
pub const RUN_NUMBER_VAR: &str = "GITHUB_RUN_NUMBER";
pub const COMMIT_VAR: &str = "GITHUB_SHA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineContext {
    pub branch_name: String,
    pub run_sequence: u64,
    /// Eight-character commit identifier prefix
    pub commit_id_prefix: String,
}

/// Values supplied explicitly, e.g. from command-line flags
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub branch: Option<String>,
    pub run_number: Option<u64>,
    pub commit: Option<String>,
}

impl PipelineContext {
    /// Resolve the context from overrides, then the CI environment, then git.
    ///
    /// The run counter defaults to 0 outside CI.
    pub fn discover<R: Repository>(
        overrides: &ContextOverrides,
        repo: Option<&R>,
    ) -> Result<Self> {
        let branch_name = match overrides.branch.clone().or_else(branch_from_env) {
            Some(branch) => branch,
            None => repo
                .map(|r| r.current_branch())
                .transpose()?
                .flatten()
                .ok_or_else(|| {
                    ResolverError::config("Cannot determine branch name; pass --branch")
                })?,
        };

        let run_sequence = match overrides.run_number {
            Some(n) => n,
            None => run_number_from_env()?.unwrap_or(0),
        };

        let commit = match overrides.commit.clone().or_else(|| non_empty_var(COMMIT_VAR)) {
            Some(sha) => sha,
            None => repo
                .map(|r| r.head_commit_id())
                .transpose()?
                .ok_or_else(|| {
                    ResolverError::config("Cannot determine commit identifier; pass --commit")
                })?,
        };
        let commit_id_prefix = BuildMetadata::from_commit_id(&commit)?.as_str().to_string();

        Ok(PipelineContext {
            branch_name,
            run_sequence,
            commit_id_prefix,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn branch_from_env() -> Option<String> {
    BRANCH_VARS.iter().find_map(|name| non_empty_var(name))
}

fn run_number_from_env() -> Result<Option<u64>> {
    non_empty_var(RUN_NUMBER_VAR)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|_| {
                ResolverError::config(format!("{} is not a number: '{}'", RUN_NUMBER_VAR, raw))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use serial_test::serial;

    fn clear_env() {
        for name in BRANCH_VARS.iter().chain([RUN_NUMBER_VAR, COMMIT_VAR].iter()) {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_context_from_environment() {
        clear_env();
        env::set_var("GITHUB_REF_NAME", "develop");
        env::set_var(RUN_NUMBER_VAR, "17");
        env::set_var(COMMIT_VAR, "a1b2c3d4e5f6a7b8c9d0a1b2c3d4e5f6a7b8c9d0");

        let ctx =
            PipelineContext::discover::<MockRepository>(&ContextOverrides::default(), None)
                .unwrap();
        assert_eq!(ctx.branch_name, "develop");
        assert_eq!(ctx.run_sequence, 17);
        assert_eq!(ctx.commit_id_prefix, "a1b2c3d4");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_head_ref_wins_for_pull_requests() {
        clear_env();
        env::set_var("GITHUB_HEAD_REF", "feature/login");
        env::set_var("GITHUB_REF_NAME", "42/merge");
        let overrides = ContextOverrides {
            commit: Some("deadbeef".to_string()),
            ..ContextOverrides::default()
        };

        let ctx = PipelineContext::discover::<MockRepository>(&overrides, None).unwrap();
        assert_eq!(ctx.branch_name, "feature/login");
        assert_eq!(ctx.run_sequence, 0);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_win_over_environment() {
        clear_env();
        env::set_var("GITHUB_REF_NAME", "develop");
        env::set_var(RUN_NUMBER_VAR, "5");
        let overrides = ContextOverrides {
            branch: Some("main".to_string()),
            run_number: Some(99),
            commit: Some("0123456789abcdef".to_string()),
        };

        let ctx = PipelineContext::discover::<MockRepository>(&overrides, None).unwrap();
        assert_eq!(ctx.branch_name, "main");
        assert_eq!(ctx.run_sequence, 99);
        assert_eq!(ctx.commit_id_prefix, "01234567");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_falls_back_to_repository() {
        clear_env();
        let mut repo = MockRepository::new();
        repo.set_branch("release/2.0");
        repo.add_commit("feedface00112233", "feat: x");

        let ctx = PipelineContext::discover(&ContextOverrides::default(), Some(&repo)).unwrap();
        assert_eq!(ctx.branch_name, "release/2.0");
        assert_eq!(ctx.commit_id_prefix, "feedface");
    }

    #[test]
    #[serial]
    fn test_invalid_run_number() {
        clear_env();
        env::set_var(RUN_NUMBER_VAR, "abc");
        let overrides = ContextOverrides {
            branch: Some("main".to_string()),
            commit: Some("deadbeef".to_string()),
            ..ContextOverrides::default()
        };
        assert!(PipelineContext::discover::<MockRepository>(&overrides, None).is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_branch_is_an_error() {
        clear_env();
        let overrides = ContextOverrides {
            commit: Some("deadbeef".to_string()),
            ..ContextOverrides::default()
        };
        let err = PipelineContext::discover::<MockRepository>(&overrides, None).unwrap_err();
        assert!(err.to_string().contains("--branch"));
    }
}
