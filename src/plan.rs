//! Follow-up actions derived from a [`VersionDecision`]
//!
//! The plan is what the manifest writer, tag creator, publishers and the
//! release creator act on. Computing it is pure; carrying it out is not.

use crate::config::{RoutingConfig, TagsConfig};
use crate::domain::{BranchContext, Tier};
use crate::error::Result;
use crate::resolver::VersionDecision;
use serde::Serialize;

/// Release to create for a stable version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseSpec {
    pub tag_name: String,
    pub prerelease: bool,
    pub draft: bool,
}

/// Why no tag is planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSkip {
    Unchanged,
    BranchNotAllowed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleasePlan {
    pub write_manifest: bool,
    pub tag_name: String,
    pub create_tag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_skipped: Option<TagSkip>,
    pub tier: Tier,
    pub artifact_store: String,
    pub container_registry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseSpec>,
}

impl ReleasePlan {
    pub fn from_decision(
        decision: &VersionDecision,
        branch: &BranchContext,
        tags: &TagsConfig,
        routing: &RoutingConfig,
    ) -> Result<Self> {
        let tag_name = tags.tag_pattern()?.format(&decision.new_version);

        let tag_skipped = if !decision.version_changed {
            Some(TagSkip::Unchanged)
        } else if !branch.allows_tagging() {
            Some(TagSkip::BranchNotAllowed)
        } else {
            None
        };

        // artifact and container routing share one category mapping
        let tier = Tier::for_category(&decision.version_category);

        let release = (decision.version_changed && decision.version_category == "release").then(
            || ReleaseSpec {
                tag_name: tag_name.clone(),
                prerelease: decision.is_prerelease,
                draft: false,
            },
        );

        Ok(ReleasePlan {
            write_manifest: decision.version_changed,
            create_tag: tag_skipped.is_none(),
            tag_name,
            tag_skipped,
            tier,
            artifact_store: routing.artifact_store.target(tier).to_string(),
            container_registry: routing.container_registry.target(tier).to_string(),
            release,
        })
    }
}
