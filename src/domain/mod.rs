//! Domain logic - pure versioning rules independent of git, manifests and CI

pub mod branch;
pub mod channel;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{classify, BranchContext, BranchMatcher, BranchRule, BRANCH_RULES, TAG_BRANCHES};
pub use channel::{Channel, Tier};
pub use commit::ParsedCommit;
pub use prerelease::PreRelease;
pub use tag::TagPattern;
pub use version::{BuildMetadata, Version, VersionBump, BUILD_METADATA_LEN};
