//! Pure formatting functions for UI output.
//!
//! Status lines go to stderr so stdout carries only the rendered decision.

use crate::analyzer::CommitAnalysis;
use crate::boundary::BoundaryWarning;
use crate::plan::ReleasePlan;
use crate::resolver::VersionDecision;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Summarise commit analysis: the tag it started from and the suggestion.
pub fn display_commit_analysis(analysis: &CommitAnalysis) {
    let since = analysis.latest_tag.as_deref().unwrap_or("the first commit");
    let suggestion = analysis
        .suggestion
        .map(|bump| bump.to_string())
        .unwrap_or_else(|| "none".to_string());
    display_status(&format!(
        "Analyzed {} commit(s) since {}: suggested bump {}",
        analysis.commit_count, since, suggestion
    ));
}

/// Human-readable report of a decision and its plan.
pub fn format_decision(current: &str, decision: &VersionDecision, plan: &ReleasePlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style("Version Decision:").bold()));
    out.push_str(&format!("  From:      {}\n", style(current).red()));
    out.push_str(&format!(
        "  To:        {}\n",
        style(&decision.new_version).green()
    ));
    out.push_str(&format!("  Category:  {}\n", decision.version_category));
    out.push_str(&format!("  Prerelease: {}\n", decision.is_prerelease));
    out.push_str(&format!(
        "  Publish:   {} ({} / {})\n",
        plan.tier, plan.artifact_store, plan.container_registry
    ));
    let tag = if plan.create_tag {
        plan.tag_name.clone()
    } else {
        "(none)".to_string()
    };
    out.push_str(&format!("  Tag:       {}\n", tag));
    if let Some(release) = &plan.release {
        out.push_str(&format!(
            "  Release:   {} (prerelease: {})\n",
            release.tag_name, release.prerelease
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RoutingConfig, TagsConfig};
    use crate::domain::BranchContext;
    use crate::resolver::{resolve, ResolveRequest, Strategy};

    #[test]
    fn test_format_decision_mentions_version_and_tier() {
        console::set_colors_enabled(false);
        let decision = resolve(&ResolveRequest {
            current_version: "1.4.2".to_string(),
            strategy: Strategy::Auto,
            custom_prerelease: None,
            branch_name: "develop".to_string(),
            commit_suggested_bump: None,
            run_sequence: 17,
            commit_id_prefix: "a1b2c3d4".to_string(),
        })
        .unwrap();
        let plan = ReleasePlan::from_decision(
            &decision,
            &BranchContext::new("develop"),
            &TagsConfig::default(),
            &RoutingConfig::default(),
        )
        .unwrap();

        let text = format_decision("1.4.2", &decision, &plan);
        assert!(text.contains("1.4.3-dev.17+a1b2c3d4"));
        assert!(text.contains("testing (artifacts-testing / registry-testing)"));
        assert!(text.contains("Tag:       v1.4.3-dev.17+a1b2c3d4"));
        assert!(!text.contains("Release:"));
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stderr
        display_status("test status");
        display_success("test success");
        display_error("test error");
    }
}
