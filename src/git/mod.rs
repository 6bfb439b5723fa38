//! Git operations abstraction layer
//!
//! The resolver never touches git directly. Commit analysis and tag creation
//! go through the [Repository] trait, implemented by:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for tests

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
}

/// Git operations needed around version resolution
pub trait Repository {
    /// Name of the checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Full hash of the HEAD commit
    fn head_commit_id(&self) -> Result<String>;

    /// Most recent tag reachable from HEAD
    ///
    /// Walks history from HEAD and returns the first tagged commit's tag.
    /// Handles both lightweight and annotated tags.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Commits reachable from HEAD but not from `tag`, oldest first.
    ///
    /// With `tag == None` the whole history is returned.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>>;

    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;
}
