use crate::error::{ResolverError, Result};
use crate::git::{CommitInfo, Repository};
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are stored oldest first and tags point at an
/// index into that list.
pub struct MockRepository {
    branch: Option<String>,
    commits: Vec<CommitInfo>,
    tags: RefCell<Vec<(String, usize)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branch: None,
            commits: Vec::new(),
            tags: RefCell::new(Vec::new()),
        }
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    /// Append a commit; it becomes HEAD
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.commits.push(CommitInfo {
            hash: hash.into(),
            message: message.into(),
        });
    }

    /// Tag the current HEAD commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let head = self.commits.len().saturating_sub(1);
        self.tags.get_mut().push((name.into(), head));
    }

    /// Names of all tags, in creation order
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.borrow().iter().map(|(n, _)| n.clone()).collect()
    }

    fn tag_index(&self, name: &str) -> Option<usize> {
        self.tags
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, idx)| *idx)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn head_commit_id(&self) -> Result<String> {
        self.commits
            .last()
            .map(|c| c.hash.clone())
            .ok_or_else(|| ResolverError::config("Repository has no commits"))
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let tags = self.tags.borrow();
        let latest = tags
            .iter()
            .enumerate()
            .max_by_key(|(order, (_, idx))| (*idx, *order))
            .map(|(_, (name, _))| name.clone());
        Ok(latest)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let start = match tag {
            Some(name) => {
                self.tag_index(name).ok_or_else(|| {
                    ResolverError::config(format!("Tag '{}' does not exist", name))
                })? + 1
            }
            None => 0,
        };
        Ok(self.commits.iter().skip(start).cloned().collect())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tag_index(name).is_some())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.commits.is_empty() {
            return Err(ResolverError::config("Cannot tag an empty repository"));
        }
        if self.tag_exists(name)? {
            return Err(ResolverError::config(format!("Tag '{}' already exists", name)));
        }
        self.tags
            .borrow_mut()
            .push((name.to_string(), self.commits.len() - 1));
        Ok(())
    }
}
