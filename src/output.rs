//! Rendering a decision for the invoking pipeline

use crate::error::Result;
use crate::plan::ReleasePlan;
use crate::resolver::VersionDecision;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Variable naming the step-output file in GitHub-style runners
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// One JSON object on stdout
    Json,
    /// `key=value` lines, appended to `$GITHUB_OUTPUT` when set
    Github,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    decision: &'a VersionDecision,
    plan: &'a ReleasePlan,
}

/// Decision plus plan as a JSON document
pub fn to_json(decision: &VersionDecision, plan: &ReleasePlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { decision, plan })?)
}

/// Decision fields as `key=value` lines
pub fn to_key_values(decision: &VersionDecision, plan: &ReleasePlan) -> String {
    let pairs = [
        ("new_version", decision.new_version.clone()),
        ("version_changed", decision.version_changed.to_string()),
        ("is_prerelease", decision.is_prerelease.to_string()),
        ("version_category", decision.version_category.clone()),
        ("publish_tier", plan.tier.to_string()),
        ("tag_name", plan.tag_name.clone()),
    ];
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

/// Append key-value output to a step-output file
pub fn append_to_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Write key-value output to the step-output file when one is named, else to `out`
///
/// Returns whether the step-output file was used.
pub fn write_github_outputs<W: Write>(
    decision: &VersionDecision,
    plan: &ReleasePlan,
    output_file: Option<&Path>,
    out: &mut W,
) -> Result<bool> {
    let lines = to_key_values(decision, plan);
    match output_file {
        Some(path) => {
            append_to_file(path, &lines)?;
            Ok(true)
        }
        None => {
            out.write_all(lines.as_bytes())?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoutingConfig, TagsConfig};
    use crate::domain::BranchContext;
    use crate::resolver::{resolve, ResolveRequest, Strategy};

    fn sample() -> (VersionDecision, ReleasePlan) {
        let decision = resolve(&ResolveRequest {
            current_version: "2.0.0".to_string(),
            strategy: Strategy::Minor,
            custom_prerelease: None,
            branch_name: "main".to_string(),
            commit_suggested_bump: None,
            run_sequence: 3,
            commit_id_prefix: "deadbeef".to_string(),
        })
        .unwrap();
        let plan = ReleasePlan::from_decision(
            &decision,
            &BranchContext::new("main"),
            &TagsConfig::default(),
            &RoutingConfig::default(),
        )
        .unwrap();
        (decision, plan)
    }

    #[test]
    fn test_key_values() {
        let (decision, plan) = sample();
        let out = to_key_values(&decision, &plan);
        assert!(out.contains("new_version=2.1.0+deadbeef\n"));
        assert!(out.contains("version_changed=true\n"));
        assert!(out.contains("is_prerelease=false\n"));
        assert!(out.contains("version_category=release\n"));
        assert!(out.contains("publish_tier=release\n"));
        assert!(out.contains("tag_name=v2.1.0+deadbeef\n"));
    }

    #[test]
    fn test_json_report() {
        let (decision, plan) = sample();
        let json: serde_json::Value = serde_json::from_str(&to_json(&decision, &plan).unwrap())
            .unwrap();
        assert_eq!(json["new_version"], "2.1.0+deadbeef");
        assert_eq!(json["plan"]["tier"], "release");
        assert_eq!(json["plan"]["release"]["prerelease"], false);
        assert_eq!(json["plan"]["artifact_store"], "artifacts-release");
    }

    #[test]
    fn test_append_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        append_to_file(file.path(), "a=1\n").unwrap();
        append_to_file(file.path(), "b=2\n").unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "a=1\nb=2\n");
    }

    #[test]
    fn test_github_outputs_to_step_file() {
        let (decision, plan) = sample();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "earlier=1\n").unwrap();

        let mut stdout = Vec::new();
        let used_file =
            write_github_outputs(&decision, &plan, Some(file.path()), &mut stdout).unwrap();
        assert!(used_file);
        assert!(stdout.is_empty());

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.starts_with("earlier=1\nnew_version=2.1.0+deadbeef\n"));
        assert_eq!(written.lines().count(), 7);
    }

    #[test]
    fn test_github_outputs_without_step_file() {
        let (decision, plan) = sample();
        let mut stdout = Vec::new();
        let used_file = write_github_outputs(&decision, &plan, None, &mut stdout).unwrap();
        assert!(!used_file);
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            to_key_values(&decision, &plan)
        );
    }

    #[test]
    fn test_key_values_one_line_per_key() {
        // a label that would otherwise smuggle an extra line is refused upstream
        let request = ResolveRequest {
            current_version: "1.0.0".to_string(),
            strategy: Strategy::Auto,
            custom_prerelease: Some("x\nversion_category=release".to_string()),
            branch_name: "feature/x".to_string(),
            commit_suggested_bump: None,
            run_sequence: 1,
            commit_id_prefix: "abcdef12".to_string(),
        };
        assert!(resolve(&request).is_err());

        let (decision, plan) = sample();
        let out = to_key_values(&decision, &plan);
        assert_eq!(out.lines().count(), 6);
        assert_eq!(out.matches("version_category=").count(), 1);
    }
}
